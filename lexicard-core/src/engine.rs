//! The bucket engine: a three-tier, weighted-random card picker.
//!
//! Cards enter in [`Tier::Learn`] and move between tiers through
//! [`BucketEngine::promote`] and [`BucketEngine::demote`]. Selection weights
//! depend only on which tiers are occupied (see [`Weights::for_occupancy`]).
//!
//! One engine belongs to one learner session. It holds no locks; hosts that
//! serve concurrent requests wrap it in a mutex.

use crate::tiers::TierSlots;
use crate::{Card, CardId, CoreError, Tier, TierSizes, Weights};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub const DEFAULT_CAPACITY: usize = 3000;
pub const DEFAULT_PICK_ATTEMPTS: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Ceiling on tracked cards, enforced by [`BucketEngine::add_cards_bounded`] only.
    pub capacity: usize,
    /// Weighted draws tried before falling back to a flat scan.
    pub pick_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            pick_attempts: DEFAULT_PICK_ATTEMPTS,
        }
    }
}

/// What a promote/demote call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Transition {
    Moved { from: Tier, to: Tier },
    Unchanged { tier: Tier },
    Untracked,
}

impl Transition {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Transition::Moved { to, .. } => Some(*to),
            Transition::Unchanged { tier } => Some(*tier),
            Transition::Untracked => None,
        }
    }
}

/// A question card and up to two wrong answers. Distractors are `None` when
/// the pool has too few distinct cards.
#[derive(Clone, Debug, Serialize)]
pub struct DistractorSet {
    pub question: Card,
    pub first: Option<Card>,
    pub second: Option<Card>,
}

impl DistractorSet {
    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }

    /// All three cards, question first, or `None` for a partial set.
    pub fn choices(&self) -> Option<[&Card; 3]> {
        match (&self.first, &self.second) {
            (Some(a), Some(b)) => Some([&self.question, a, b]),
            _ => None,
        }
    }
}

pub struct BucketEngine<R = StdRng> {
    catalog: HashMap<CardId, Card>,
    slots: TierSlots,
    current: Option<CardId>,
    config: EngineConfig,
    rng: R,
}

impl BucketEngine<StdRng> {
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self::with_config(cards, EngineConfig::default())
    }

    pub fn with_config(cards: impl IntoIterator<Item = Card>, config: EngineConfig) -> Self {
        Self::with_rng(cards, config, StdRng::from_entropy())
    }

    pub fn seeded(cards: impl IntoIterator<Item = Card>, config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(cards, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BucketEngine<R> {
    pub fn with_rng(cards: impl IntoIterator<Item = Card>, config: EngineConfig, rng: R) -> Self {
        let mut engine = Self {
            catalog: HashMap::new(),
            slots: TierSlots::default(),
            current: None,
            config,
            rng,
        };
        engine.add_cards(cards);
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sizes(&self) -> TierSizes {
        TierSizes {
            learn: self.slots.len(Tier::Learn),
            review: self.slots.len(Tier::Review),
            known: self.slots.len(Tier::Known),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.total() == 0
    }

    pub fn tier_of(&self, id: CardId) -> Option<Tier> {
        self.slots.tier_of(id)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.catalog.get(&id)
    }

    pub fn ids_in(&self, tier: Tier) -> &[CardId] {
        self.slots.members(tier)
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.current.and_then(|id| self.catalog.get(&id))
    }

    pub fn weights(&self) -> Option<Weights> {
        Weights::for_occupancy(
            self.slots.len(Tier::Learn) > 0,
            self.slots.len(Tier::Review) > 0,
            self.slots.len(Tier::Known) > 0,
        )
    }

    /// Appends to `Learn` without a capacity check. Ids that are already
    /// tracked keep their tier. Returns how many ids became tracked.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) -> usize {
        let mut added = 0;
        for card in cards {
            if self.slots.insert(card.id, Tier::Learn) {
                added += 1;
            } else {
                debug!(card = card.id, "card already tracked, keeping its tier");
            }
            self.catalog.insert(card.id, card);
        }
        debug!(added, sizes = ?self.sizes(), "cards added");
        added
    }

    /// Capacity-aware add. Evicts from `Known` to make room, or rejects the
    /// whole batch without touching any tier.
    pub fn add_cards_bounded(&mut self, cards: Vec<Card>) -> Result<usize, CoreError> {
        let incoming = cards.len();
        let known = self.slots.len(Tier::Known);
        let total = self.slots.total() + incoming;

        if total >= self.config.capacity {
            let deficit = total - self.config.capacity;
            if incoming > known || known <= deficit {
                warn!(incoming, known, deficit, "capacity exceeded, batch rejected");
                return Err(CoreError::CapacityExceeded {
                    incoming,
                    known,
                    deficit,
                });
            }
            for _ in 0..deficit {
                self.evict_one()?;
            }
        }
        Ok(self.add_cards(cards))
    }

    /// Weighted pick of a card not in `exclude`. The pick becomes the current card.
    pub fn pick_card(&mut self, exclude: &[CardId]) -> Result<Card, CoreError> {
        let Some(weights) = self.weights() else {
            warn!("pick requested with no cards in any tier");
            return Err(CoreError::EmptyPool);
        };
        let exclude: HashSet<CardId> = exclude.iter().copied().collect();

        let id = match self.draw(weights, &exclude) {
            Some(id) => id,
            None => {
                let id = self.fallback_id(&exclude)?;
                debug!(card = id, "fallback selection used");
                id
            }
        };
        self.current = Some(id);
        debug!(card = id, ?weights, "picked");
        self.lookup(id)
    }

    /// Uniform pick over every tracked card not in `exclude`, ignoring tier
    /// weights. Does not move the cursor.
    pub fn fallback_pick(&mut self, exclude: &[CardId]) -> Result<Card, CoreError> {
        let exclude: HashSet<CardId> = exclude.iter().copied().collect();
        let id = self.fallback_id(&exclude)?;
        self.lookup(id)
    }

    /// Picks a card other than the current one. The current card repeats only
    /// when it is the last one tracked.
    pub fn pick_next(&mut self) -> Result<Card, CoreError> {
        let exclude: Vec<CardId> = self.current.into_iter().collect();
        match self.pick_card(&exclude) {
            Err(CoreError::InsufficientUniqueCards { .. }) => self.pick_card(&[]),
            other => other,
        }
    }

    pub fn get_current_card(&mut self) -> Result<Card, CoreError> {
        if let Some(card) = self.current_card() {
            return Ok(card.clone());
        }
        self.pick_card(&[])
    }

    /// Leaves the cursor on the question card, not on the last distractor drawn.
    pub fn pick_distractor_set(&mut self) -> Result<DistractorSet, CoreError> {
        let question = self.pick_card(&[])?;
        let first = self.pick_card(&[question.id]).ok();
        let second = match &first {
            Some(a) => self.pick_card(&[question.id, a.id]).ok(),
            None => None,
        };
        self.current = Some(question.id);
        Ok(DistractorSet {
            question,
            first,
            second,
        })
    }

    pub fn promote(&mut self, id: CardId, high_priority: bool) -> Transition {
        let Some(from) = self.slots.tier_of(id) else {
            debug!(card = id, "promote on untracked card ignored");
            return Transition::Untracked;
        };
        let to = match from {
            Tier::Learn if high_priority => Tier::Known,
            other => other.up(),
        };
        self.apply_move(id, from, to)
    }

    pub fn demote(&mut self, id: CardId) -> Transition {
        let Some(from) = self.slots.tier_of(id) else {
            debug!(card = id, "demote on untracked card ignored");
            return Transition::Untracked;
        };
        self.apply_move(id, from, from.down())
    }

    /// Drops every `Known` card from the engine. Returns how many were dropped.
    pub fn forget_known(&mut self) -> usize {
        let ids = self.slots.drain(Tier::Known);
        for id in &ids {
            self.purge(*id);
        }
        debug!(dropped = ids.len(), "known tier forgotten");
        ids.len()
    }

    pub fn forget_all(&mut self) -> usize {
        let dropped = self.slots.total();
        self.slots.clear();
        self.catalog.clear();
        self.current = None;
        debug!(dropped, "all tiers forgotten");
        dropped
    }

    fn apply_move(&mut self, id: CardId, from: Tier, to: Tier) -> Transition {
        if from == to {
            return Transition::Unchanged { tier: from };
        }
        self.slots.move_to(id, to);
        debug!(card = id, ?from, ?to, "card moved");
        Transition::Moved { from, to }
    }

    fn evict_one(&mut self) -> Result<CardId, CoreError> {
        if self.slots.len(Tier::Known) == 0 {
            warn!("eviction needed but known tier is empty");
            return Err(CoreError::EmptyPool);
        }
        let id = self
            .draw(Weights::KNOWN_ONLY, &HashSet::new())
            .ok_or(CoreError::EmptyPool)?;
        self.slots.remove(id);
        self.purge(id);
        debug!(card = id, "evicted from known");
        Ok(id)
    }

    fn purge(&mut self, id: CardId) {
        self.catalog.remove(&id);
        if self.current == Some(id) {
            self.current = None;
        }
    }

    fn draw(&mut self, weights: Weights, exclude: &HashSet<CardId>) -> Option<CardId> {
        for _ in 0..self.config.pick_attempts {
            let tier = weights.draw(&mut self.rng);
            let Some(&id) = self.slots.members(tier).choose(&mut self.rng) else {
                continue;
            };
            if !exclude.contains(&id) {
                return Some(id);
            }
        }
        None
    }

    fn fallback_id(&mut self, exclude: &HashSet<CardId>) -> Result<CardId, CoreError> {
        let available: Vec<CardId> = self.slots.iter().filter(|id| !exclude.contains(id)).collect();
        available.choose(&mut self.rng).copied().ok_or_else(|| {
            warn!(excluded = exclude.len(), "not enough unique cards for exclusion list");
            CoreError::InsufficientUniqueCards {
                excluded: exclude.len(),
            }
        })
    }

    fn lookup(&self, id: CardId) -> Result<Card, CoreError> {
        self.catalog.get(&id).cloned().ok_or(CoreError::NotFound("card"))
    }
}
