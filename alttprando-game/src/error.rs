use thiserror::Error;

use crate::Item;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandoError {
    // Configuration errors abort the world build.
    #[error("unknown ruleset: {0}")]
    UnknownRuleset(String),
    #[error("duplicate location name: {0}")]
    DuplicateLocation(String),
    #[error("item pool has {items} items but only {slots} locations are available")]
    PoolMismatch { items: usize, slots: usize },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    // Lookups by name never fall back to a default.
    #[error("unknown location: {0}")]
    UnknownLocation(String),
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("unknown item: {0}")]
    UnknownItem(String),

    // Failures of a single fill attempt; the caller discards the fill and tries again.
    #[error("unable to place {item:?} after {attempts} attempts")]
    PlacementExhausted { item: Item, attempts: usize },
    #[error("world not completable: {unvisited} required locations unvisited, incomplete regions {incomplete:?}")]
    Unsolvable {
        unvisited: usize,
        incomplete: Vec<String>,
    },

    #[error("exhausted {attempts} randomization attempts for seed {seed}")]
    AttemptsExhausted { seed: u64, attempts: usize },
}

impl RandoError {
    /// Whether a fresh fill attempt may succeed where this one failed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RandoError::PlacementExhausted { .. } | RandoError::Unsolvable { .. }
        )
    }
}
