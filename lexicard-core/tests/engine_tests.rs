use lexicard_core::{BucketEngine, Card, CoreError, EngineConfig, Tier, Transition, Weights};

fn cards(n: u64) -> Vec<Card> {
    (1..=n)
        .map(|i| Card::new(i, format!("t{i}"), format!("p{i}"), format!("e{i}")))
        .collect()
}

fn engine(n: u64) -> BucketEngine {
    BucketEngine::seeded(cards(n), EngineConfig::default(), 7)
}

fn small(capacity: usize) -> EngineConfig {
    EngineConfig {
        capacity,
        ..EngineConfig::default()
    }
}

#[test]
fn new_engine_seeds_learn_only() {
    let e = engine(10);
    let s = e.sizes();
    assert_eq!((s.learn, s.review, s.known), (10, 0, 0));
    assert_eq!(e.weights(), Some(Weights::new(0, 0, 100)));
}

#[test]
fn high_priority_promote_changes_weights() {
    let mut e = engine(10);
    let card = e.pick_card(&[]).unwrap();
    assert_eq!(e.tier_of(card.id), Some(Tier::Learn));

    let t = e.promote(card.id, true);
    assert_eq!(t, Transition::Moved { from: Tier::Learn, to: Tier::Known });
    assert_eq!(e.sizes().known, 1);
    assert_eq!(e.sizes().learn, 9);
    assert_eq!(e.weights(), Some(Weights::new(30, 0, 70)));
}

#[test]
fn promote_and_demote_walk_the_ladder() {
    let mut e = engine(1);
    assert_eq!(e.promote(1, false), Transition::Moved { from: Tier::Learn, to: Tier::Review });
    assert_eq!(e.promote(1, false), Transition::Moved { from: Tier::Review, to: Tier::Known });
    assert_eq!(e.promote(1, true), Transition::Unchanged { tier: Tier::Known });
    assert_eq!(e.demote(1), Transition::Moved { from: Tier::Known, to: Tier::Review });
    assert_eq!(e.demote(1), Transition::Moved { from: Tier::Review, to: Tier::Learn });
    assert_eq!(e.demote(1), Transition::Unchanged { tier: Tier::Learn });
}

#[test]
fn high_priority_from_review_moves_one_step() {
    let mut e = engine(2);
    e.promote(2, false);
    assert_eq!(e.promote(2, true), Transition::Moved { from: Tier::Review, to: Tier::Known });
}

#[test]
fn untracked_transitions_are_noops() {
    let mut e = engine(1);
    assert_eq!(e.promote(6, false), Transition::Untracked);
    assert_eq!(e.demote(6), Transition::Untracked);
    let s = e.sizes();
    assert_eq!((s.learn, s.review, s.known), (1, 0, 0));
}

#[test]
fn empty_engine_cannot_pick() {
    let mut e = engine(0);
    assert_eq!(e.weights(), None);
    assert_eq!(e.pick_card(&[]), Err(CoreError::EmptyPool));
    assert_eq!(e.get_current_card(), Err(CoreError::EmptyPool));
    assert!(matches!(e.pick_distractor_set(), Err(CoreError::EmptyPool)));
}

#[test]
fn weights_follow_occupancy_table() {
    let table = [
        ((false, false, true), (100, 0, 0)),
        ((false, true, false), (0, 100, 0)),
        ((false, true, true), (30, 70, 0)),
        ((true, false, false), (0, 0, 100)),
        ((true, false, true), (30, 0, 70)),
        ((true, true, false), (0, 30, 70)),
        ((true, true, true), (10, 20, 70)),
    ];
    for ((l, r, k), (wk, wr, wl)) in table {
        for _ in 0..3 {
            let w = Weights::for_occupancy(l, r, k).unwrap();
            assert_eq!(w, Weights::new(wk, wr, wl));
            assert_eq!(w.total(), 100);
        }
    }
    assert_eq!(Weights::for_occupancy(false, false, false), None);
}

#[test]
fn zero_weight_tiers_are_never_picked() {
    let mut e = engine(6);
    e.promote(1, false);
    e.promote(2, false);
    // Learn + Review occupied, Known empty
    for _ in 0..200 {
        let c = e.pick_card(&[]).unwrap();
        assert_ne!(e.tier_of(c.id), Some(Tier::Known));
    }
    // Only Review left
    for id in 3..=6 {
        e.promote(id, false);
    }
    for _ in 0..50 {
        let c = e.pick_card(&[]).unwrap();
        assert_eq!(e.tier_of(c.id), Some(Tier::Review));
    }
}

#[test]
fn pick_honours_exclusions() {
    let mut e = engine(4);
    for _ in 0..100 {
        let c = e.pick_card(&[1, 2, 3]).unwrap();
        assert_eq!(c.id, 4);
    }
    assert_eq!(
        e.pick_card(&[1, 2, 3, 4]),
        Err(CoreError::InsufficientUniqueCards { excluded: 4 })
    );
}

#[test]
fn fallback_pick_ignores_weights() {
    let mut e = BucketEngine::seeded(cards(3), EngineConfig { capacity: 3000, pick_attempts: 0 }, 1);
    // No weighted draws at all: every pick goes through the fallback scan.
    let c = e.pick_card(&[1, 3]).unwrap();
    assert_eq!(c.id, 2);
    assert_eq!(e.fallback_pick(&[2, 3]).unwrap().id, 1);
    assert!(e.fallback_pick(&[1, 2, 3]).is_err());
}

#[test]
fn current_card_is_sticky_until_next_pick() {
    let mut e = engine(10);
    assert!(e.current_card().is_none());
    let first = e.get_current_card().unwrap();
    for _ in 0..5 {
        assert_eq!(e.get_current_card().unwrap(), first);
    }
    e.promote(first.id, false);
    assert_eq!(e.get_current_card().unwrap(), first);

    let next = e.pick_card(&[first.id]).unwrap();
    assert_eq!(e.get_current_card().unwrap(), next);
}

#[test]
fn forgetting_current_card_clears_cursor() {
    let mut e = engine(3);
    let c = e.get_current_card().unwrap();
    e.promote(c.id, true);
    assert_eq!(e.forget_known(), 1);
    assert!(e.current_card().is_none());
    assert_ne!(e.get_current_card().unwrap().id, c.id);
}

#[test]
fn distractor_set_is_distinct_with_three_or_more_cards() {
    for n in [3, 4, 10] {
        let mut e = engine(n);
        for _ in 0..100 {
            let set = e.pick_distractor_set().unwrap();
            let [q, a, b] = set.choices().expect("complete set");
            assert_ne!(q.id, a.id);
            assert_ne!(q.id, b.id);
            assert_ne!(a.id, b.id);
            assert_eq!(e.current_card().map(|c| c.id), Some(q.id));
        }
    }
}

#[test]
fn distractor_set_with_two_cards_has_no_third() {
    let mut e = engine(2);
    let set = e.pick_distractor_set().unwrap();
    let first = set.first.as_ref().expect("one distractor");
    assert_ne!(first.id, set.question.id);
    assert!(set.second.is_none());
    assert!(!set.is_complete());
}

#[test]
fn distractor_set_with_one_card() {
    let mut e = engine(1);
    let set = e.pick_distractor_set().unwrap();
    assert_eq!(set.question.id, 1);
    assert!(set.first.is_none());
    assert!(set.second.is_none());
}

#[test]
fn add_cards_keeps_existing_tier_for_duplicates() {
    let mut e = engine(3);
    e.promote(2, true);
    let added = e.add_cards(cards(4));
    assert_eq!(added, 1);
    assert_eq!(e.tier_of(2), Some(Tier::Known));
    assert_eq!(e.sizes().total(), 4);
}

#[test]
fn bounded_add_under_capacity_appends() {
    let mut e = BucketEngine::seeded(Vec::new(), small(10), 3);
    assert_eq!(e.add_cards_bounded(cards(4)).unwrap(), 4);
    assert_eq!(e.sizes().learn, 4);
}

#[test]
fn bounded_add_rejects_more_incoming_than_known() {
    let mut e = BucketEngine::seeded(cards(8), small(10), 3);
    for id in 1..=3 {
        e.promote(id, true);
    }
    let before: Vec<Vec<u64>> = Tier::ALL.iter().map(|t| e.ids_in(*t).to_vec()).collect();

    let incoming: Vec<Card> = (100..104).map(|i| Card::new(i, "x", "y", "z")).collect();
    let err = e.add_cards_bounded(incoming).unwrap_err();
    assert_eq!(err, CoreError::CapacityExceeded { incoming: 4, known: 3, deficit: 2 });

    let after: Vec<Vec<u64>> = Tier::ALL.iter().map(|t| e.ids_in(*t).to_vec()).collect();
    assert_eq!(before, after);
}

#[test]
fn bounded_add_rejects_when_known_cannot_cover_deficit() {
    let mut e = BucketEngine::seeded(cards(12), small(10), 3);
    e.promote(1, true);
    e.promote(2, true);
    let before = e.sizes();

    let incoming: Vec<Card> = (100..102).map(|i| Card::new(i, "x", "y", "z")).collect();
    assert!(matches!(
        e.add_cards_bounded(incoming),
        Err(CoreError::CapacityExceeded { deficit: 4, .. })
    ));
    assert_eq!(e.sizes(), before);
}

#[test]
fn bounded_add_evicts_known_to_make_room() {
    let mut e = BucketEngine::seeded(cards(8), small(10), 3);
    for id in 1..=3 {
        e.promote(id, true);
    }
    let incoming: Vec<Card> = (100..103).map(|i| Card::new(i, "x", "y", "z")).collect();
    assert_eq!(e.add_cards_bounded(incoming).unwrap(), 3);

    let s = e.sizes();
    assert_eq!(s.known, 2);
    assert_eq!(s.learn, 8);
    assert_eq!(s.total(), 10);
    let evicted = (1..=3).filter(|id| e.tier_of(*id).is_none()).count();
    assert_eq!(evicted, 1);
}

fn snapshot(e: &BucketEngine) -> Vec<Vec<u64>> {
    Tier::ALL.iter().map(|t| e.ids_in(*t).to_vec()).collect()
}

#[test]
fn bounded_add_landing_exactly_on_capacity_needs_known_cards() {
    let incoming = || (100..102).map(|i| Card::new(i, "x", "y", "z")).collect::<Vec<_>>();

    let mut bare = BucketEngine::seeded(cards(8), small(10), 3);
    let before = snapshot(&bare);
    assert_eq!(
        bare.add_cards_bounded(incoming()),
        Err(CoreError::CapacityExceeded { incoming: 2, known: 0, deficit: 0 })
    );
    assert_eq!(snapshot(&bare), before);

    let mut e = BucketEngine::seeded(cards(8), small(10), 3);
    for id in 1..=3 {
        e.promote(id, true);
    }
    assert_eq!(e.add_cards_bounded(incoming()), Ok(2));
    let s = e.sizes();
    assert_eq!((s.learn, s.review, s.known), (7, 0, 3));
    assert!((1..=3).all(|id| e.tier_of(id) == Some(Tier::Known)));
}

#[test]
fn bounded_add_rejects_when_known_equals_deficit() {
    let incoming = || (100..102).map(|i| Card::new(i, "x", "y", "z")).collect::<Vec<_>>();

    let mut e = BucketEngine::seeded(cards(10), small(10), 3);
    e.promote(1, true);
    e.promote(2, true);
    let before = snapshot(&e);
    assert_eq!(
        e.add_cards_bounded(incoming()),
        Err(CoreError::CapacityExceeded { incoming: 2, known: 2, deficit: 2 })
    );
    assert_eq!(snapshot(&e), before);

    // one more known card than the deficit is enough
    e.promote(3, true);
    assert_eq!(e.add_cards_bounded(incoming()), Ok(2));
    let s = e.sizes();
    assert_eq!((s.learn, s.review, s.known), (9, 0, 1));
    assert_eq!(s.total(), 10);
}

#[test]
fn forget_all_empties_everything() {
    let mut e = engine(10);
    e.promote(1, true);
    e.promote(2, false);
    assert_eq!(e.forget_all(), 10);
    assert!(e.is_empty());
    assert_eq!(e.pick_card(&[]), Err(CoreError::EmptyPool));
}

#[test]
fn pick_next_avoids_current_until_it_is_the_last_card() {
    let mut e = engine(4);
    let mut prev = e.get_current_card().unwrap().id;
    for _ in 0..20 {
        let next = e.pick_next().unwrap().id;
        assert_ne!(next, prev);
        prev = next;
    }

    let mut solo = engine(1);
    assert_eq!(solo.pick_next().unwrap().id, 1);
    assert_eq!(solo.pick_next().unwrap().id, 1);
}
