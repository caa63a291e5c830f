use crate::{Card, CardId, CoreError, Deck};
use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryRepo;

#[async_trait]
pub trait Repository: Send + Sync {
    // Decks
    async fn create_deck(&self, name: &str, target_language: &str) -> Result<Deck, CoreError>;
    /// Inserts or replaces a whole deck, keyed by name.
    async fn save_deck(&self, deck: &Deck) -> Result<(), CoreError>;
    async fn get_deck(&self, name: &str) -> Result<Deck, CoreError>;
    async fn list_decks(&self) -> Result<Vec<Deck>, CoreError>;
    async fn delete_deck(&self, name: &str) -> Result<(), CoreError>;

    // Cards
    async fn add_card(
        &self,
        deck: &str,
        target_word: &str,
        phonetic: &str,
        explain: &str,
        sound: Option<&str>,
    ) -> Result<Card, CoreError>;

    async fn set_correction_flag(&self, deck: &str, card: CardId, flag: bool) -> Result<(), CoreError>;
}

/// Shared by repository implementations: builds the card and bumps the deck's id counter.
pub fn append_card(
    deck: &mut Deck,
    target_word: &str,
    phonetic: &str,
    explain: &str,
    sound: Option<&str>,
) -> Result<Card, CoreError> {
    if target_word.trim().is_empty() {
        return Err(CoreError::Invalid("target word is empty"));
    }
    let id = deck.next_card_id();
    let mut card = Card::new(id, target_word, phonetic, explain);
    if let Some(s) = sound {
        card = card.with_sound(s);
    }
    deck.last_id_used = id;
    deck.cards.push(card.clone());
    Ok(card)
}

pub fn flag_card(deck: &mut Deck, card: CardId, flag: bool) -> Result<(), CoreError> {
    let Some(c) = deck.cards.iter_mut().find(|c| c.id == card) else {
        return Err(CoreError::NotFound("card"));
    };
    c.check_for_correction = flag;
    Ok(())
}

pub fn deck_key(name: &str) -> String {
    name.trim().to_lowercase()
}
