use lexicard_core::{BucketEngine, Card, CardId, EngineConfig, Tier};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Add(Vec<CardId>),
    AddBounded(Vec<CardId>),
    Promote(CardId, bool),
    Demote(CardId),
    Pick,
    ForgetKnown,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        prop::collection::vec(0u64..30, 0..5).prop_map(Op::Add),
        prop::collection::vec(0u64..30, 0..5).prop_map(Op::AddBounded),
        (0u64..30, any::<bool>()).prop_map(|(id, hp)| Op::Promote(id, hp)),
        (0u64..30).prop_map(Op::Demote),
        Just(Op::Pick),
        Just(Op::ForgetKnown),
    ]
}

fn card(id: CardId) -> Card {
    Card::new(id, format!("w{id}"), "", "")
}

fn tier_sets(e: &BucketEngine) -> Vec<HashSet<CardId>> {
    Tier::ALL
        .iter()
        .map(|t| e.ids_in(*t).iter().copied().collect())
        .collect()
}

proptest! {
    #[test]
    fn tiers_stay_a_partition(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..60)) {
        let config = EngineConfig { capacity: 12, pick_attempts: 50 };
        let mut e = BucketEngine::seeded(Vec::new(), config, seed);
        let mut tracked: HashSet<CardId> = HashSet::new();

        for op in ops {
            match op {
                Op::Add(ids) => {
                    e.add_cards(ids.iter().copied().map(card));
                    tracked.extend(ids);
                }
                Op::AddBounded(ids) => {
                    let before = tier_sets(&e);
                    if e.add_cards_bounded(ids.iter().copied().map(card).collect()).is_ok() {
                        // anything that disappeared must have come from Known
                        let now: HashSet<CardId> = tier_sets(&e).into_iter().flatten().collect();
                        for gone in tracked.difference(&now) {
                            prop_assert!(before[2].contains(gone));
                        }
                        tracked = now;
                        tracked.extend(ids);
                    } else {
                        prop_assert_eq!(before, tier_sets(&e));
                    }
                }
                Op::Promote(id, hp) => {
                    let from = e.tier_of(id);
                    e.promote(id, hp);
                    prop_assert!(e.tier_of(id) >= from);
                }
                Op::Demote(id) => {
                    let from = e.tier_of(id);
                    e.demote(id);
                    prop_assert!(e.tier_of(id) <= from);
                    prop_assert_eq!(e.tier_of(id).is_some(), from.is_some());
                }
                Op::Pick => {
                    let res = e.pick_card(&[]);
                    prop_assert_eq!(res.is_ok(), !tracked.is_empty());
                }
                Op::ForgetKnown => {
                    for id in e.ids_in(Tier::Known).to_vec() {
                        tracked.remove(&id);
                    }
                    e.forget_known();
                }
            }

            let sets = tier_sets(&e);
            prop_assert!(sets[0].is_disjoint(&sets[1]));
            prop_assert!(sets[0].is_disjoint(&sets[2]));
            prop_assert!(sets[1].is_disjoint(&sets[2]));
            let union: HashSet<CardId> = sets.into_iter().flatten().collect();
            prop_assert_eq!(&union, &tracked);
            prop_assert_eq!(e.sizes().total(), tracked.len());
        }
    }
}
