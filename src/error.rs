//! Error types for the firefly optimizer.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FireflyError>;

/// Errors produced while configuring or running the optimizer.
///
/// Every variant is fatal: the run is aborted at the point of detection
/// and nothing is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FireflyError {
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("tournament_size ({tournament_size}) exceeds population_size ({population_size})")]
    TournamentTooLarge {
        tournament_size: usize,
        population_size: usize,
    },

    #[error("num_children ({num_children}) exceeds population_size ({population_size})")]
    TooManyChildren {
        num_children: usize,
        population_size: usize,
    },

    #[error(
        "objective returned non-finite cost {value} for colony {colony}, individual {individual}"
    )]
    NonFiniteCost {
        colony: usize,
        individual: usize,
        value: f64,
    },

    #[error(
        "zero cost for colony {colony}, individual {individual} cannot be inverted into fitness"
    )]
    ZeroCost { colony: usize, individual: usize },

    #[error("swarm buffer has {actual} values, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl FireflyError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        FireflyError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
