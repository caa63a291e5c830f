use crate::repo::{append_card, deck_key, flag_card};
use crate::{Card, CardId, CoreError, Deck};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryRepo {
    decks: RwLock<HashMap<String, Deck>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl crate::repo::Repository for MemoryRepo {
    async fn create_deck(&self, name: &str, target_language: &str) -> Result<Deck, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Invalid("deck name is empty"));
        }
        let mut m = self.decks.write();
        if m.contains_key(&deck_key(name)) {
            return Err(CoreError::Conflict("deck name already exists"));
        }
        let deck = Deck::new(name.trim(), target_language);
        m.insert(deck_key(name), deck.clone());
        Ok(deck)
    }

    async fn save_deck(&self, deck: &Deck) -> Result<(), CoreError> {
        self.decks.write().insert(deck_key(&deck.name), deck.clone());
        Ok(())
    }

    async fn get_deck(&self, name: &str) -> Result<Deck, CoreError> {
        self.decks
            .read()
            .get(&deck_key(name))
            .cloned()
            .ok_or(CoreError::NotFound("deck"))
    }

    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError> {
        Ok(self.decks.read().values().cloned().collect())
    }

    async fn delete_deck(&self, name: &str) -> Result<(), CoreError> {
        self.decks
            .write()
            .remove(&deck_key(name))
            .map(|_| ())
            .ok_or(CoreError::NotFound("deck"))
    }

    async fn add_card(
        &self,
        deck: &str,
        target_word: &str,
        phonetic: &str,
        explain: &str,
        sound: Option<&str>,
    ) -> Result<Card, CoreError> {
        let mut m = self.decks.write();
        let Some(d) = m.get_mut(&deck_key(deck)) else {
            return Err(CoreError::NotFound("deck"));
        };
        append_card(d, target_word, phonetic, explain, sound)
    }

    async fn set_correction_flag(&self, deck: &str, card: CardId, flag: bool) -> Result<(), CoreError> {
        let mut m = self.decks.write();
        let Some(d) = m.get_mut(&deck_key(deck)) else {
            return Err(CoreError::NotFound("deck"));
        };
        flag_card(d, card, flag)
    }
}
