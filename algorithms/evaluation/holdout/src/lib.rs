//! Repeated holdout evaluation of the k-NN classifier.
//!
//! Each iteration draws a fresh stratified split from two labeled pools,
//! classifies the test half against the training half, and scores the
//! predictions against the held-back labels.
//!
//! # Quick start
//!
//! ```
//! use holdout::{HoldoutConfig, evaluate};
//! use pokeclass_helpers::{Category, Sample};
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let pikachus: Vec<Sample> = (0..8)
//!     .map(|i| Sample::labeled(24.0 + i as f64 * 0.1, 31.0, Category::Pikachu))
//!     .collect();
//! let pichus: Vec<Sample> = (0..8)
//!     .map(|i| Sample::labeled(10.0 + i as f64 * 0.1, 11.0, Category::Pichu))
//!     .collect();
//!
//! let config = HoldoutConfig::new()
//!     .with_iterations(3)
//!     .with_training_amount(5)
//!     .with_test_amount(3);
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//!
//! let report = evaluate(&pikachus, &pichus, &config, &mut rng).unwrap();
//! assert_eq!(report.per_iteration_accuracies, vec![1.0, 1.0, 1.0]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! evaluate()
//!   ├─ validate config and pools
//!   └─ per iteration
//!       ├─ stratified_split()   (split.rs)
//!       ├─ k_nn::predict_all()  on unlabeled test copies
//!       └─ accuracy()           (report.rs)
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod split;

pub use config::HoldoutConfig;
pub use error::HoldoutError;
pub use report::{EvaluationReport, accuracy};
pub use split::{Split, stratified_split};

use k_nn::predict_all;
use pokeclass_helpers::{Category, Float, Sample};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, info};

/// Runs `config.iterations()` rounds of stratified holdout evaluation.
///
/// `pool_a` and `pool_b` hold the labeled samples of the two categories.
/// They are never modified; every iteration works on fresh copies. Test
/// samples are classified with their labels stripped, and the labels are
/// only used afterward for scoring.
///
/// # Errors
///
/// Everything is checked before the first iteration:
/// `HoldoutError::InvalidIterations`, `EmptyTrainingSlice`, `EmptyTestSlice`
/// and `Knn` for bad configuration (see [`HoldoutConfig::validate`]),
/// `PoolTooSmall` if either pool holds fewer than
/// `training_amount + test_amount` samples, and `UnlabeledSample` if any pool
/// sample has no label.
pub fn evaluate<F, R>(
    pool_a: &[Sample<F>],
    pool_b: &[Sample<F>],
    config: &HoldoutConfig,
    rng: &mut R,
) -> Result<EvaluationReport, HoldoutError>
where
    F: Float,
    R: Rng + ?Sized,
{
    config.validate()?;
    check_pool("first", pool_a, config.samples_per_pool())?;
    check_pool("second", pool_b, config.samples_per_pool())?;

    let mut accuracies = Vec::with_capacity(config.iterations());
    for iteration in 0..config.iterations() {
        let split = stratified_split(
            pool_a,
            pool_b,
            config.training_amount(),
            config.test_amount(),
            rng,
        )?;

        // Ground truth comes from the test samples; the classifier only sees
        // unlabeled copies.
        let truth: Vec<Category> = split.test.iter().filter_map(Sample::label).collect();
        let queries: Vec<Sample<F>> = split.test.iter().map(Sample::unlabeled).collect();

        let predictions = predict_all(&split.training, &queries, config.k())?;
        let iteration_accuracy = accuracy(&predictions, &truth);
        debug!(
            iteration,
            accuracy = iteration_accuracy,
            test_samples = truth.len(),
            "holdout iteration complete"
        );
        accuracies.push(iteration_accuracy);
    }

    let report = EvaluationReport::from_accuracies(accuracies, config.test_set_size());
    info!(
        iterations = report.iterations(),
        mean_accuracy = report.mean_accuracy,
        k = config.k(),
        "holdout evaluation complete"
    );
    Ok(report)
}

/// Runs [`evaluate`] with a `Xoshiro256PlusPlus` generator seeded from `seed`.
///
/// The same seed and pools always produce the same report.
pub fn evaluate_with_seed<F: Float>(
    pool_a: &[Sample<F>],
    pool_b: &[Sample<F>],
    config: &HoldoutConfig,
    seed: u64,
) -> Result<EvaluationReport, HoldoutError> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    evaluate(pool_a, pool_b, config, &mut rng)
}

fn check_pool<F: Float>(
    name: &'static str,
    pool: &[Sample<F>],
    required: usize,
) -> Result<(), HoldoutError> {
    split::check_size(name, pool, required)?;
    if let Some(index) = pool.iter().position(|s| !s.is_labeled()) {
        return Err(HoldoutError::UnlabeledSample { pool: name, index });
    }
    Ok(())
}
