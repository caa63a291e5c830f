use lexicard_core::{BucketEngine, Card, CardId, CoreError, Deck, EngineConfig, Repository};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Clone, Debug, Default)]
pub struct EngineSettings {
    pub config: EngineConfig,
    pub seed: Option<u64>,
}

/// Deck each session card was loaded from. Card ids are only unique within a
/// deck, so a session never holds two cards with the same id.
#[derive(Clone, Debug, Default)]
pub struct CardOrigins(HashMap<CardId, String>);

impl CardOrigins {
    pub fn deck_of(&self, card: CardId) -> Option<&str> {
        self.0.get(&card).map(String::as_str)
    }

    fn record(&mut self, deck: &str, cards: &[Card]) {
        for c in cards {
            self.0.insert(c.id, deck.to_string());
        }
    }
}

impl EngineSettings {
    pub fn build(&self, cards: Vec<Card>) -> BucketEngine {
        match self.seed {
            Some(seed) => BucketEngine::seeded(cards, self.config.clone(), seed),
            None => BucketEngine::with_config(cards, self.config.clone()),
        }
    }

    /// First deck seeds the engine; the rest go through [`add_deck`].
    /// Capacity rejections skip a deck, id collisions fail the session.
    pub async fn build_from_decks<R: Repository + ?Sized>(
        &self,
        repo: &R,
        decks: &[String],
    ) -> Result<(BucketEngine, CardOrigins), CoreError> {
        let Some((first, rest)) = decks.split_first() else {
            return Err(CoreError::Invalid("no deck given"));
        };
        let first = repo.get_deck(first).await?;
        let mut origins = CardOrigins::default();
        origins.record(&first.name, &first.cards);
        let mut engine = self.build(first.cards);

        for name in rest {
            let deck = repo.get_deck(name).await?;
            match add_deck(&mut engine, &mut origins, deck) {
                Ok(n) => info!(deck = %name, added = n, "deck added to session"),
                Err(e @ CoreError::CapacityExceeded { .. }) => warn!(deck = %name, error = %e, "deck skipped"),
                Err(e) => return Err(e),
            }
        }
        Ok((engine, origins))
    }
}

/// Adds a deck to a running session under the capacity rule. A deck sharing
/// any card id with a tracked card is rejected before anything changes.
pub fn add_deck(engine: &mut BucketEngine, origins: &mut CardOrigins, deck: Deck) -> Result<usize, CoreError> {
    if let Some(card) = deck.cards.iter().find(|c| engine.tier_of(c.id).is_some()) {
        warn!(deck = %deck.name, card = card.id, owner = ?origins.deck_of(card.id), "card id already in session");
        return Err(CoreError::Conflict("card id already used by another deck in this session"));
    }
    let added = engine.add_cards_bounded(deck.cards.clone())?;
    origins.record(&deck.name, &deck.cards);
    Ok(added)
}
