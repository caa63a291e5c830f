use crate::Judgment;
use serde::Serialize;

/// Read-only tier counts, for display only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TierSizes {
    pub learn: usize,
    pub review: usize,
    pub known: usize,
}

impl TierSizes {
    pub fn total(&self) -> usize {
        self.learn + self.review + self.known
    }
}

impl std::fmt::Display for TierSizes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "known {} / review {} / learn {}",
            self.known, self.review, self.learn
        )
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SessionScore {
    pub tally: u32,
    pub correct: u32,
    pub confident: u32,
    pub incorrect: u32,
    pub skipped: u32,
}

impl SessionScore {
    pub fn record(&mut self, j: &Judgment) {
        self.tally += j.points();
        match j {
            Judgment::Correct { confident } => {
                self.correct += 1;
                if *confident {
                    self.confident += 1;
                }
            }
            Judgment::Incorrect => self.incorrect += 1,
            Judgment::Skip => self.skipped += 1,
        }
    }

    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    pub fn accuracy(&self) -> f32 {
        if self.answered() == 0 {
            0.0
        } else {
            self.correct as f32 / self.answered() as f32
        }
    }
}
