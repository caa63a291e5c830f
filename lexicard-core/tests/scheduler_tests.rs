use lexicard_core::{apply_judgment, BucketEngine, Card, EngineConfig, Judgment, Tier, Transition};

fn deck_engine() -> BucketEngine {
    let cards = (1..=5).map(|i| Card::new(i, format!("w{i}"), "", format!("e{i}")));
    BucketEngine::seeded(cards, EngineConfig::default(), 11)
}

#[test]
fn confident_answer_skips_review() {
    let mut e = deck_engine();
    let t = apply_judgment(&mut e, 1, Judgment::Correct { confident: true });
    assert_eq!(t, Some(Transition::Moved { from: Tier::Learn, to: Tier::Known }));
    assert_eq!(e.tier_of(1), Some(Tier::Known));
}

#[test]
fn plain_correct_then_incorrect() {
    let mut e = deck_engine();
    apply_judgment(&mut e, 2, Judgment::Correct { confident: false });
    assert_eq!(e.tier_of(2), Some(Tier::Review));

    let t = apply_judgment(&mut e, 2, Judgment::Incorrect);
    assert_eq!(t, Some(Transition::Moved { from: Tier::Review, to: Tier::Learn }));
}

#[test]
fn skip_leaves_tiers_alone() {
    let mut e = deck_engine();
    let before = e.sizes();
    assert_eq!(apply_judgment(&mut e, 3, Judgment::Skip), None);
    assert_eq!(e.sizes(), before);
}

#[test]
fn parse_judgments() {
    assert_eq!(Judgment::parse("Y"), Some(Judgment::Correct { confident: false }));
    assert_eq!(Judgment::parse(" confident "), Some(Judgment::Correct { confident: true }));
    assert_eq!(Judgment::parse("wrong"), Some(Judgment::Incorrect));
    assert_eq!(Judgment::parse("s"), Some(Judgment::Skip));
    assert_eq!(Judgment::parse("maybe"), None);
}
