use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("no cards in any tier")]
    EmptyPool,
    #[error("not enough unique cards to pick with {excluded} excluded")]
    InsufficientUniqueCards { excluded: usize },
    #[error("capacity exceeded: {incoming} incoming, {known} evictable, {deficit} slots short")]
    CapacityExceeded {
        incoming: usize,
        known: usize,
        deficit: usize,
    },
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("invalid input: {0}")]
    Invalid(&'static str),
    #[error("conflict: {0}")]
    Conflict(&'static str),
    #[error("storage error: {0}")]
    Storage(&'static str),
}
