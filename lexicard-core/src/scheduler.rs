use crate::{BucketEngine, CardId, Transition};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The learner's verdict on one card.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    /// Answered correctly. `confident` means without revealing the answer
    /// (or in multiple choice), and jumps a `Learn` card straight to `Known`.
    Correct { confident: bool },
    Incorrect,
    Skip,
}

impl Judgment {
    pub fn parse(s: &str) -> Option<Judgment> {
        match s.trim().to_lowercase().as_str() {
            "y" | "yes" | "correct" => Some(Judgment::Correct { confident: false }),
            "c" | "confident" | "known" => Some(Judgment::Correct { confident: true }),
            "n" | "no" | "incorrect" | "wrong" => Some(Judgment::Incorrect),
            "s" | "skip" => Some(Judgment::Skip),
            _ => None,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Judgment::Correct { confident: true } => 2,
            Judgment::Correct { confident: false } => 1,
            Judgment::Incorrect | Judgment::Skip => 0,
        }
    }
}

pub fn apply_judgment<R: Rng>(
    engine: &mut BucketEngine<R>,
    card: CardId,
    judgment: Judgment,
) -> Option<Transition> {
    match judgment {
        Judgment::Correct { confident } => Some(engine.promote(card, confident)),
        Judgment::Incorrect => Some(engine.demote(card)),
        Judgment::Skip => None,
    }
}
