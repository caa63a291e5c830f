use lexicard_core::{Card, CardId, SessionScore, TierSizes, Transition};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
pub struct DeckOut {
    pub name: String,
    pub author: String,
    pub description: String,
    pub target_language: String,
    pub cards: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CardOut {
    pub id: CardId,
    pub target_word: String,
    pub phonetic: String,
    pub explain: String,
    pub sound: Option<String>,
    pub check_for_correction: bool,
}

impl From<&Card> for CardOut {
    fn from(c: &Card) -> Self {
        Self {
            id: c.id,
            target_word: c.target_word.clone(),
            phonetic: c.phonetic.clone(),
            explain: c.explain.clone(),
            sound: c.sound.clone(),
            check_for_correction: c.check_for_correction,
        }
    }
}

#[derive(Deserialize)]
pub struct SessionIn {
    pub decks: Vec<String>,
}

#[derive(Serialize)]
pub struct SessionOut {
    pub session_id: Uuid,
    pub decks: Vec<String>,
    pub sizes: TierSizes,
}

#[derive(Deserialize)]
pub struct AddDeckIn {
    pub deck: String,
}

#[derive(Serialize)]
pub struct AddDeckOut {
    pub added: usize,
    pub sizes: TierSizes,
}

#[derive(Serialize)]
pub struct QuizOut {
    pub question: CardOut,
    /// Shuffled; contains the question card. Empty when the pool is too small.
    pub choices: Vec<CardOut>,
    pub complete: bool,
}

#[derive(Deserialize)]
pub struct JudgeIn {
    pub card_id: CardId,
    /// correct | confident | incorrect | skip
    pub judgment: String,
}

#[derive(Serialize)]
pub struct JudgeOut {
    pub transition: Option<Transition>,
    pub score: SessionScore,
    pub sizes: TierSizes,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForgetScope {
    Known,
    All,
}

#[derive(Deserialize)]
pub struct ForgetIn {
    pub scope: ForgetScope,
}

#[derive(Serialize)]
pub struct ForgetOut {
    pub dropped: usize,
    pub sizes: TierSizes,
}
