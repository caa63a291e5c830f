//! Single-deck JSON files, the format decks are shared and imported in.

use anyhow::{bail, Context, Result};
use lexicard_core::Deck;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

pub fn load_deck_file(path: &Path) -> Result<Deck> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let deck: Deck =
        serde_json::from_str(&raw).with_context(|| format!("parsing deck {}", path.display()))?;
    check_unique_ids(&deck)?;
    info!(deck = %deck.name, cards = deck.cards.len(), "deck loaded from {}", path.display());
    Ok(deck)
}

pub fn save_deck_file(deck: &Deck, path: &Path) -> Result<()> {
    let json = serde_json::to_vec_pretty(deck)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.persist(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(deck = %deck.name, "deck saved to {}", path.display());
    Ok(())
}

/// Card ids key the bucket engine, so a deck with repeated ids is rejected.
pub fn check_unique_ids(deck: &Deck) -> Result<()> {
    let mut seen = HashSet::new();
    for c in &deck.cards {
        if !seen.insert(c.id) {
            bail!("deck {} has duplicate card id {}", deck.name, c.id);
        }
    }
    Ok(())
}
