//! Error types for the holdout crate.

use k_nn::KnnError;

/// Error type for all fallible operations in the holdout crate.
///
/// Every variant describes an invalid argument; none is raised partway
/// through an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HoldoutError {
    /// Returned when the iteration count is zero.
    #[error("iterations must be >= 1, got {iterations}")]
    InvalidIterations {
        /// The invalid iteration count.
        iterations: usize,
    },

    /// Returned when no training samples would be drawn.
    #[error("training_amount must be >= 1, got 0")]
    EmptyTrainingSlice,

    /// Returned when no test samples would be drawn.
    #[error("test_amount must be >= 1, got 0")]
    EmptyTestSlice,

    /// Returned when a pool cannot supply training + test samples.
    #[error("{pool} pool has {available} samples but {required} are needed")]
    PoolTooSmall {
        /// Which pool is too small ("first" or "second").
        pool: &'static str,
        /// training_amount + test_amount.
        required: usize,
        /// Size of the pool.
        available: usize,
    },

    /// Returned when the requested amounts cannot be counted in a `usize`.
    #[error("training_amount {training_amount} and test_amount {test_amount} overflow the sample count")]
    AmountOverflow {
        training_amount: usize,
        test_amount: usize,
    },

    /// Returned when a pool sample has no ground-truth label.
    #[error("sample {index} in the {pool} pool has no label")]
    UnlabeledSample {
        /// Which pool holds the sample ("first" or "second").
        pool: &'static str,
        /// Position of the sample in its pool.
        index: usize,
    },

    /// Returned when the classifier rejects its arguments.
    #[error(transparent)]
    Knn(#[from] KnnError),
}
