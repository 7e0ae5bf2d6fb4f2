//! Nearest-neighbor classification of Pikachu and Pichu measurements.
//!
//! The algorithms live in the workspace crates and are re-exported here:
//! samples and distances from `pokeclass-helpers`, the classifier from
//! `k-nn`, and repeated holdout evaluation from `holdout`. The [`dataset`]
//! module reads the labeled and test-point text files.

pub mod dataset;

pub use holdout::{
    EvaluationReport, HoldoutConfig, HoldoutError, Split, accuracy, evaluate, evaluate_with_seed,
    stratified_split,
};
pub use k_nn::{KnnClassifier, KnnError, Neighbor, k_nearest, majority_vote, predict, predict_all};
pub use pokeclass_helpers::{Category, Distance, Float, L2Dist, Sample, SampleError, euclidean};
