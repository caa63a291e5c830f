use serde::{Deserialize, Serialize};

pub type CardId = u64;

/// Sentinel used on disk for "this card has no audio".
pub const NO_SOUND: &str = "0";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    #[serde(rename = "tid")]
    pub id: CardId,
    #[serde(with = "sound_sentinel", default)]
    pub sound: Option<String>,
    #[serde(default)]
    pub check_for_correction: bool,
    pub phonetic: String,
    pub target_word: String,
    pub explain: String,
}

impl Card {
    pub fn new(
        id: CardId,
        target_word: impl Into<String>,
        phonetic: impl Into<String>,
        explain: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sound: None,
            check_for_correction: false,
            phonetic: phonetic.into(),
            target_word: target_word.into(),
            explain: explain.into(),
        }
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = parse_sound(&sound.into());
        self
    }

    pub fn has_audio(&self) -> bool {
        self.sound.is_some()
    }
}

/// `"0"` and blank strings both mean "no audio".
pub fn parse_sound(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() || s == NO_SOUND {
        None
    } else {
        Some(s.to_string())
    }
}

mod sound_sentinel {
    use super::{parse_sound, NO_SOUND};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(v.as_deref().unwrap_or(NO_SOUND))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.as_deref().and_then(parse_sound))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub author: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub target_language: String,
    #[serde(default, alias = "_last_id_used")]
    pub last_id_used: CardId,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            author: String::new(),
            name: name.into(),
            description: String::new(),
            target_language: target_language.into(),
            last_id_used: 0,
            cards: Vec::new(),
        }
    }

    pub fn next_card_id(&self) -> CardId {
        let max_card = self.cards.iter().map(|c| c.id).max().unwrap_or(0);
        self.last_id_used.max(max_card) + 1
    }

    pub fn find_card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}
