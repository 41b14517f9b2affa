pub mod chain;
pub mod generate;

pub use chain::MarkovChain;

use thiserror::Error;

/// Errors reported before any training or generation work begins.
///
/// Dead ends during generation are deliberately not represented here: they
/// are recovered internally by re-seeding and never reach the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("chain order must be at least 1")]
    OrderZero,
    #[error("no note pairs in the training data")]
    EmptyTraining,
    #[error("order {order} is too large for a training melody of {available} note pairs")]
    TrainingTooShort { order: usize, available: usize },
    #[error("output length must be at least 1")]
    LengthZero,
}
