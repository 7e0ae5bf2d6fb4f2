//! Configuration for repeated holdout evaluation.

use k_nn::KnnError;

use crate::error::HoldoutError;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Configuration for [`crate::evaluate`].
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use holdout::HoldoutConfig;
///
/// let config = HoldoutConfig::new()
///     .with_iterations(20)
///     .with_k(3);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.samples_per_pool(), 75);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", default)
)]
pub struct HoldoutConfig {
    /// Number of independent train/test splits.
    iterations: usize,
    /// Training samples drawn from each pool per iteration.
    training_amount: usize,
    /// Test samples drawn from each pool per iteration.
    test_amount: usize,
    /// Neighbors consulted per prediction.
    k: usize,
}

impl Default for HoldoutConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            training_amount: 50,
            test_amount: 25,
            k: 1,
        }
    }
}

impl HoldoutConfig {
    /// Creates a configuration with the defaults.
    ///
    /// Defaults: `iterations = 10`, `training_amount = 50`, `test_amount = 25`, `k = 1`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_training_amount(mut self, training_amount: usize) -> Self {
        self.training_amount = training_amount;
        self
    }

    pub fn with_test_amount(mut self, test_amount: usize) -> Self {
        self.test_amount = test_amount;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn training_amount(&self) -> usize {
        self.training_amount
    }

    pub fn test_amount(&self) -> usize {
        self.test_amount
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Samples each pool must hold: `training_amount + test_amount`.
    ///
    /// Saturates at `usize::MAX`; exact for any configuration that passes
    /// [`validate`](Self::validate).
    pub fn samples_per_pool(&self) -> usize {
        self.training_amount.saturating_add(self.test_amount)
    }

    /// Size of the combined training set built each iteration. Saturating.
    pub fn training_set_size(&self) -> usize {
        self.training_amount.saturating_mul(2)
    }

    /// Size of the combined test set built each iteration. Saturating.
    pub fn test_set_size(&self) -> usize {
        self.test_amount.saturating_mul(2)
    }

    fn check_amounts(&self) -> Result<(), HoldoutError> {
        let fits = self.training_amount.checked_add(self.test_amount).is_some()
            && self.training_amount.checked_mul(2).is_some()
            && self.test_amount.checked_mul(2).is_some();
        if !fits {
            return Err(HoldoutError::AmountOverflow {
                training_amount: self.training_amount,
                test_amount: self.test_amount,
            });
        }
        Ok(())
    }

    /// Checks the parameters that do not depend on the pools.
    ///
    /// # Errors
    ///
    /// Returns `HoldoutError::InvalidIterations` for zero iterations,
    /// `EmptyTrainingSlice`/`EmptyTestSlice` for zero amounts,
    /// `AmountOverflow` if the per-pool or combined set sizes do not fit in a
    /// `usize`, and
    /// `HoldoutError::Knn` if `k` is zero or larger than the training set.
    pub fn validate(&self) -> Result<(), HoldoutError> {
        if self.iterations == 0 {
            return Err(HoldoutError::InvalidIterations {
                iterations: self.iterations,
            });
        }
        if self.training_amount == 0 {
            return Err(HoldoutError::EmptyTrainingSlice);
        }
        if self.test_amount == 0 {
            return Err(HoldoutError::EmptyTestSlice);
        }
        self.check_amounts()?;
        if self.k == 0 {
            return Err(KnnError::InvalidK { k: self.k }.into());
        }
        if self.k > self.training_set_size() {
            return Err(KnnError::KTooLarge {
                k: self.k,
                len: self.training_set_size(),
            }
            .into());
        }
        Ok(())
    }
}
