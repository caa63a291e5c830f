use lexicard_core::{
    filter_by_text, filter_needs_correction, filter_with_audio, Card, Deck, Judgment, SessionScore,
    TierSizes,
};

#[test]
fn filters_text_flag_and_audio() {
    let mut c1 = Card::new(1, "สวัสดี", "sawatdii", "hello").with_sound("s_0001");
    c1.check_for_correction = true;
    let c2 = Card::new(2, "ขอบคุณ", "khop khun", "thank you").with_sound("0");

    let v = vec![c1.clone(), c2.clone()];

    let by_text = filter_by_text(&v, "THANK");
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].id, 2);
    assert_eq!(filter_by_text(&v, "  ").len(), 2);

    let flagged = filter_needs_correction(&v);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].id, 1);

    let with_audio = filter_with_audio(&v);
    assert_eq!(with_audio.len(), 1);
    assert_eq!(with_audio[0].sound.as_deref(), Some("s_0001"));
}

#[test]
fn session_score_tally() {
    let mut s = SessionScore::default();
    s.record(&Judgment::Correct { confident: true });
    s.record(&Judgment::Correct { confident: false });
    s.record(&Judgment::Incorrect);
    s.record(&Judgment::Skip);

    assert_eq!(s.tally, 3);
    assert_eq!(s.correct, 2);
    assert_eq!(s.confident, 1);
    assert_eq!(s.skipped, 1);
    assert!((s.accuracy() - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(SessionScore::default().accuracy(), 0.0);
}

#[test]
fn tier_sizes_display() {
    let s = TierSizes { learn: 9, review: 0, known: 1 };
    assert_eq!(s.total(), 10);
    assert_eq!(s.to_string(), "known 1 / review 0 / learn 9");
}

#[test]
fn deck_json_uses_sound_sentinel() {
    let raw = r#"{
        "author": "a", "name": "demo", "description": "d", "target_language": "th",
        "_last_id_used": 40,
        "cards": [
            {"tid": 7, "sound": "0", "check_for_correction": false,
             "phonetic": "p", "target_word": "t", "explain": "e"},
            {"tid": 8, "sound": "s_0008", "check_for_correction": true,
             "phonetic": "p", "target_word": "t", "explain": "e"}
        ]
    }"#;
    let deck: Deck = serde_json::from_str(raw).unwrap();
    assert_eq!(deck.cards[0].sound, None);
    assert_eq!(deck.cards[1].sound.as_deref(), Some("s_0008"));
    assert_eq!(deck.next_card_id(), 41);

    let out = serde_json::to_value(&deck.cards[0]).unwrap();
    assert_eq!(out["sound"], "0");
    assert_eq!(out["tid"], 7);
}
