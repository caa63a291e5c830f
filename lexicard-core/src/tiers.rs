use crate::CardId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Classification buckets, ordered `Learn < Review < Known`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Learn,
    Review,
    Known,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Learn, Tier::Review, Tier::Known];

    pub fn up(self) -> Tier {
        match self {
            Tier::Learn => Tier::Review,
            Tier::Review | Tier::Known => Tier::Known,
        }
    }

    pub fn down(self) -> Tier {
        match self {
            Tier::Known => Tier::Review,
            Tier::Review | Tier::Learn => Tier::Learn,
        }
    }

    fn slot(self) -> usize {
        match self {
            Tier::Learn => 0,
            Tier::Review => 1,
            Tier::Known => 2,
        }
    }
}

/// Selection weights in percent. Always sums to 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weights {
    pub known: u32,
    pub review: u32,
    pub learn: u32,
}

impl Weights {
    pub const KNOWN_ONLY: Weights = Weights::new(100, 0, 0);

    pub const fn new(known: u32, review: u32, learn: u32) -> Self {
        Self { known, review, learn }
    }

    /// Weights depend only on which tiers are occupied, never on their sizes.
    pub fn for_occupancy(learn: bool, review: bool, known: bool) -> Option<Weights> {
        let w = match (learn, review, known) {
            (false, false, false) => return None,
            (false, false, true) => Weights::new(100, 0, 0),
            (false, true, false) => Weights::new(0, 100, 0),
            (false, true, true) => Weights::new(30, 70, 0),
            (true, false, false) => Weights::new(0, 0, 100),
            (true, false, true) => Weights::new(30, 0, 70),
            (true, true, false) => Weights::new(0, 30, 70),
            (true, true, true) => Weights::new(10, 20, 70),
        };
        Some(w)
    }

    pub fn total(&self) -> u32 {
        self.known + self.review + self.learn
    }

    pub fn of(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Learn => self.learn,
            Tier::Review => self.review,
            Tier::Known => self.known,
        }
    }

    /// Zero-weight tiers can never come out of this draw.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Tier {
        let roll = rng.gen_range(0..self.total().max(1));
        if roll < self.known {
            Tier::Known
        } else if roll < self.known + self.review {
            Tier::Review
        } else {
            Tier::Learn
        }
    }
}

/// Tier membership with an id -> (tier, position) index so that lookups,
/// moves and removals are O(1).
#[derive(Clone, Debug, Default)]
pub(crate) struct TierSlots {
    members: [Vec<CardId>; 3],
    index: HashMap<CardId, (Tier, usize)>,
}

impl TierSlots {
    pub fn tier_of(&self, id: CardId) -> Option<Tier> {
        self.index.get(&id).map(|(t, _)| *t)
    }

    pub fn len(&self, tier: Tier) -> usize {
        self.members[tier.slot()].len()
    }

    pub fn total(&self) -> usize {
        self.index.len()
    }

    pub fn members(&self, tier: Tier) -> &[CardId] {
        &self.members[tier.slot()]
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns false when the id is already tracked.
    pub fn insert(&mut self, id: CardId, tier: Tier) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        let v = &mut self.members[tier.slot()];
        self.index.insert(id, (tier, v.len()));
        v.push(id);
        true
    }

    pub fn remove(&mut self, id: CardId) -> Option<Tier> {
        let (tier, pos) = self.index.remove(&id)?;
        let v = &mut self.members[tier.slot()];
        v.swap_remove(pos);
        if let Some(&moved) = v.get(pos) {
            self.index.insert(moved, (tier, pos));
        }
        Some(tier)
    }

    pub fn move_to(&mut self, id: CardId, to: Tier) {
        if self.remove(id).is_some() {
            self.insert(id, to);
        }
    }

    /// Removes every member of `tier` and returns their ids.
    pub fn drain(&mut self, tier: Tier) -> Vec<CardId> {
        let ids = std::mem::take(&mut self.members[tier.slot()]);
        for id in &ids {
            self.index.remove(id);
        }
        ids
    }

    pub fn clear(&mut self) {
        for v in self.members.iter_mut() {
            v.clear();
        }
        self.index.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.members.iter().flat_map(|v| v.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_keeps_index_consistent() {
        let mut s = TierSlots::default();
        for id in 1..=4 {
            s.insert(id, Tier::Learn);
        }
        assert_eq!(s.remove(1), Some(Tier::Learn));
        // 4 was swapped into slot 0
        assert_eq!(s.members(Tier::Learn)[0], 4);
        assert_eq!(s.remove(4), Some(Tier::Learn));
        assert_eq!(s.len(Tier::Learn), 2);
        assert!(s.contains(2) && s.contains(3));
        assert_eq!(s.remove(99), None);
    }

    #[test]
    fn insert_rejects_tracked_id() {
        let mut s = TierSlots::default();
        assert!(s.insert(7, Tier::Learn));
        assert!(!s.insert(7, Tier::Known));
        assert_eq!(s.tier_of(7), Some(Tier::Learn));
        assert_eq!(s.total(), 1);
    }

    #[test]
    fn tier_steps_are_clamped() {
        assert_eq!(Tier::Known.up(), Tier::Known);
        assert_eq!(Tier::Learn.down(), Tier::Learn);
        assert_eq!(Tier::Learn.up(), Tier::Review);
        assert_eq!(Tier::Known.down(), Tier::Review);
    }
}
