use crate::Card;

pub fn filter_by_text(cards: &[Card], query: &str) -> Vec<Card> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| {
            c.target_word.to_lowercase().contains(&q)
                || c.phonetic.to_lowercase().contains(&q)
                || c.explain.to_lowercase().contains(&q)
        })
        .cloned()
        .collect()
}

pub fn filter_needs_correction(cards: &[Card]) -> Vec<Card> {
    cards
        .iter()
        .filter(|c| c.check_for_correction)
        .cloned()
        .collect()
}

pub fn filter_with_audio(cards: &[Card]) -> Vec<Card> {
    cards.iter().filter(|c| c.has_audio()).cloned().collect()
}
