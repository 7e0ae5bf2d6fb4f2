//! Evaluation results.

use pokeclass_helpers::Category;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Fraction of positions where `predictions` and `truth` agree.
///
/// Returns 0.0 for empty input.
pub fn accuracy(predictions: &[Category], truth: &[Category]) -> f64 {
    debug_assert_eq!(predictions.len(), truth.len());
    if truth.is_empty() {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .zip(truth)
        .filter(|(predicted, actual)| predicted == actual)
        .count();
    correct as f64 / truth.len() as f64
}

/// Outcome of a repeated holdout evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct EvaluationReport {
    /// Accuracy of each iteration, in run order. Each lies in `[0, 1]`.
    pub per_iteration_accuracies: Vec<f64>,
    /// Arithmetic mean of `per_iteration_accuracies`.
    pub mean_accuracy: f64,
    /// Size of the test set scored in every iteration.
    pub sample_count_per_iteration: usize,
}

impl EvaluationReport {
    pub(crate) fn from_accuracies(accuracies: Vec<f64>, sample_count_per_iteration: usize) -> Self {
        let mean_accuracy = if accuracies.is_empty() {
            0.0
        } else {
            accuracies.iter().sum::<f64>() / accuracies.len() as f64
        };
        Self {
            per_iteration_accuracies: accuracies,
            mean_accuracy,
            sample_count_per_iteration,
        }
    }

    pub fn iterations(&self) -> usize {
        self.per_iteration_accuracies.len()
    }

    pub fn min_accuracy(&self) -> Option<f64> {
        self.per_iteration_accuracies.iter().copied().reduce(f64::min)
    }

    pub fn max_accuracy(&self) -> Option<f64> {
        self.per_iteration_accuracies.iter().copied().reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pokeclass_helpers::Category::{Pichu, Pikachu};

    #[test]
    fn test_accuracy_counts_positional_matches() {
        let predictions = [Pikachu, Pichu, Pichu, Pikachu];
        let truth = [Pikachu, Pikachu, Pichu, Pichu];
        assert_abs_diff_eq!(accuracy(&predictions, &truth), 0.5);
        assert_abs_diff_eq!(accuracy(&truth, &truth), 1.0);
        assert_abs_diff_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_report_aggregates() {
        let report = EvaluationReport::from_accuracies(vec![0.9, 1.0, 0.8, 0.94], 50);
        assert_eq!(report.iterations(), 4);
        assert_abs_diff_eq!(report.mean_accuracy, 0.91, epsilon = 1e-12);
        assert_eq!(report.min_accuracy(), Some(0.8));
        assert_eq!(report.max_accuracy(), Some(1.0));
        assert_eq!(report.sample_count_per_iteration, 50);
    }

    #[test]
    fn test_empty_report() {
        let report = EvaluationReport::from_accuracies(vec![], 0);
        assert_eq!(report.iterations(), 0);
        assert_eq!(report.min_accuracy(), None);
        assert_eq!(report.mean_accuracy, 0.0);
    }
}
