//! Human-readable console output.

use pokeclass::{Category, EvaluationReport, HoldoutConfig, Sample};

/// One line per test point, in input order.
pub fn render_predictions(queries: &[Sample], predictions: &[Category]) -> String {
    queries
        .iter()
        .zip(predictions)
        .map(|(query, predicted)| {
            format!(
                "Sample with (width, height): ({}, {}) classified as {}\n",
                query.feature_a(),
                query.feature_b(),
                predicted
            )
        })
        .collect()
}

pub fn render_single(query: &Sample, predicted: Category, k: usize) -> String {
    let basis = if k == 1 {
        "the nearest neighbor".to_string()
    } else {
        format!("the {k} nearest neighbors")
    };
    format!(
        "(width, height): ({}, {}) classified as {} (based on {})\n",
        query.feature_a(),
        query.feature_b(),
        predicted,
        basis
    )
}

pub fn render_evaluation(report: &EvaluationReport, config: &HoldoutConfig, seed: u64) -> String {
    let mut out = format!(
        "Holdout evaluation: {} iterations, {} training + {} test samples per category, k = {}, seed {}\n",
        report.iterations(),
        config.training_amount(),
        config.test_amount(),
        config.k(),
        seed
    );
    for (i, acc) in report.per_iteration_accuracies.iter().enumerate() {
        out.push_str(&format!(
            "Iteration {:>3}: {} ({} test samples)\n",
            i + 1,
            percent(*acc),
            report.sample_count_per_iteration
        ));
    }
    out.push_str(&format!("Mean accuracy: {}\n", percent(report.mean_accuracy)));
    if let (Some(min), Some(max)) = (report.min_accuracy(), report.max_accuracy()) {
        out.push_str(&format!("Min / max: {} / {}\n", percent(min), percent(max)));
    }
    out
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
