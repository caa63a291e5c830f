//! CSV lexicon sheets: one header row, then
//! `tid,sound,check_for_correction,phonetic,target_word,explain`.

use anyhow::Result;
use lexicard_core::{parse_sound, Card, NO_SOUND};
use std::io::{Read, Write};
use tracing::warn;

pub const HEADER: [&str; 6] = [
    "tid",
    "sound",
    "check_for_correction",
    "phonetic",
    "target_word",
    "explain",
];

/// Rows without a numeric id are skipped with a warning, not fatal.
pub fn read_lexicon<R: Read>(rdr: R) -> Result<Vec<Card>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let mut cards = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = i + 2;
        let raw_id = rec.get(0).unwrap_or("").trim();
        if raw_id.is_empty() {
            continue;
        }
        let Ok(id) = raw_id.parse::<u64>() else {
            warn!(row, tid = raw_id, "skipping row with non-numeric id");
            continue;
        };
        let field = |n: usize| rec.get(n).unwrap_or("").trim().to_string();
        cards.push(Card {
            id,
            sound: parse_sound(&field(1)),
            check_for_correction: parse_flag(&field(2)),
            phonetic: field(3),
            target_word: field(4),
            explain: field(5),
        });
    }
    Ok(cards)
}

pub fn write_lexicon<W: Write>(w: W, cards: &[Card]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(HEADER)?;
    for c in cards {
        wtr.write_record([
            c.id.to_string(),
            c.sound.clone().unwrap_or_else(|| NO_SOUND.to_string()),
            if c.check_for_correction { "1".to_string() } else { "0".to_string() },
            c.phonetic.clone(),
            c.target_word.clone(),
            c.explain.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn parse_flag(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "1" | "true" | "yes" | "y" | "x")
}
