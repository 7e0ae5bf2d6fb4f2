use std::cmp::Ordering;
// These are the core components from our shared library.
use pokeclass_helpers::{Category, Distance, Float, L2Dist, Sample};
use tracing::trace;

/// Errors that can occur when using the k-NN classifier.
///
/// Every variant is an invalid-argument condition, detected before any
/// distances are computed (except `InvalidDistance`, which depends on the data).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnnError {
    /// The reference set has no samples.
    #[error("cannot classify against an empty reference set")]
    EmptyReference,

    /// k cannot be zero for a k-NN classifier.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// k is larger than the reference set.
    #[error("k = {k} exceeds the reference set size {len}")]
    KTooLarge {
        /// The requested neighbor count.
        k: usize,
        /// Number of reference samples.
        len: usize,
    },

    /// A reference sample has no label to vote with.
    #[error("reference sample {index} has no label")]
    UnlabeledReference {
        /// Position of the sample in the reference set.
        index: usize,
    },

    /// Invalid distance comparison (NaN values in the data).
    #[error("invalid distance comparison (likely due to NaN values in data)")]
    InvalidDistance,
}

/// One reference sample selected by [`k_nearest`].
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<'a, F: Float> {
    /// Position in the reference set.
    pub index: usize,
    /// True (not reduced) distance to the query.
    pub distance: F,
    pub sample: &'a Sample<F>,
}

/// Returns the `k` reference samples closest to `query`, nearest first.
///
/// Candidates at equal distance keep their relative order from `reference`,
/// so the result is fully deterministic.
///
/// # Errors
///
/// Returns `KnnError::EmptyReference` if `reference` is empty,
/// `KnnError::InvalidK` if `k` is 0, `KnnError::KTooLarge` if `k` exceeds the
/// reference size, and `KnnError::InvalidDistance` if any distance is NaN.
pub fn k_nearest<'a, F, D>(
    reference: &'a [Sample<F>],
    query: &Sample<F>,
    k: usize,
    distance: &D,
) -> Result<Vec<Neighbor<'a, F>>, KnnError>
where
    F: Float,
    D: Distance<F>,
{
    check_k(reference.len(), k)?;
    rank(reference, query, k, distance)
}

fn check_k(len: usize, k: usize) -> Result<(), KnnError> {
    if len == 0 {
        return Err(KnnError::EmptyReference);
    }
    if k == 0 {
        return Err(KnnError::InvalidK { k });
    }
    if k > len {
        return Err(KnnError::KTooLarge { k, len });
    }
    Ok(())
}

fn rank<'a, F, D>(
    reference: &'a [Sample<F>],
    query: &Sample<F>,
    k: usize,
    distance: &D,
) -> Result<Vec<Neighbor<'a, F>>, KnnError>
where
    F: Float,
    D: Distance<F>,
{
    // 1. Reduced distance (squared for L2) from every candidate to the query.
    //    It orders candidates the same way as the true distance.
    let mut ranked: Vec<(usize, F)> = reference
        .iter()
        .enumerate()
        .map(|(i, candidate)| (i, distance.rdistance(candidate.features(), query.features())))
        .collect();

    if ranked.iter().any(|(_, d)| d.is_nan()) {
        return Err(KnnError::InvalidDistance);
    }

    // 2. Stable sort: ties stay in reference order.
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    ranked.truncate(k);

    Ok(ranked
        .into_iter()
        .map(|(index, rdist)| Neighbor {
            index,
            distance: distance.rdist_to_dist(rdist),
            sample: &reference[index],
        })
        .collect())
}

/// Returns the most frequent category, or `None` for an empty input.
///
/// On a frequency tie the category encountered first wins. Fed with neighbors
/// nearest-first, this means the nearer of the tied categories wins.
pub fn majority_vote<I>(labels: I) -> Option<Category>
where
    I: IntoIterator<Item = Category>,
{
    // Tally in first-seen order.
    let mut tally: Vec<(Category, usize)> = Vec::with_capacity(Category::ALL.len());
    for label in labels {
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    // Only a strictly larger count displaces an earlier winner.
    tally
        .into_iter()
        .fold(None, |best: Option<(Category, usize)>, (label, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((label, count)),
        })
        .map(|(label, _)| label)
}

/// A k-Nearest Neighbors (k-NN) classifier over a borrowed reference set.
///
/// This classifier predicts the category of a new sample by finding the `k`
/// nearest reference samples and taking a majority vote among their labels
/// (see [`majority_vote`] for the tie-break rule).
///
/// # Type Parameters
///
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
/// * `D`: The distance metric, which must implement `pokeclass_helpers::Distance`.
#[derive(Debug, Clone)]
pub struct KnnClassifier<'a, F, D>
where
    F: Float,
    D: Distance<F>,
{
    k: usize,
    reference: &'a [Sample<F>],
    distance: D,
}

impl<'a, F, D> KnnClassifier<'a, F, D>
where
    F: Float,
    D: Distance<F>,
{
    /// Creates a new k-NN classifier.
    ///
    /// # Arguments
    ///
    /// * `k`: The number of neighbors to consider. Must be in `1..=reference.len()`.
    /// * `reference`: Labeled samples the classifier votes with.
    /// * `distance`: An instance of a struct that implements the `Distance` trait (e.g., `L2Dist`).
    ///
    /// # Errors
    ///
    /// Returns `KnnError::EmptyReference`, `KnnError::InvalidK` or
    /// `KnnError::KTooLarge` for a bad `k`/reference combination, and
    /// `KnnError::UnlabeledReference` if any reference sample lacks a label.
    pub fn new(k: usize, reference: &'a [Sample<F>], distance: D) -> Result<Self, KnnError> {
        check_k(reference.len(), k)?;
        if let Some(index) = reference.iter().position(|s| !s.is_labeled()) {
            return Err(KnnError::UnlabeledReference { index });
        }
        Ok(Self {
            k,
            reference,
            distance,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn reference(&self) -> &'a [Sample<F>] {
        self.reference
    }

    /// The `k` nearest reference samples to `query`, nearest first.
    pub fn neighbors(&self, query: &Sample<F>) -> Result<Vec<Neighbor<'a, F>>, KnnError> {
        rank(self.reference, query, self.k, &self.distance)
    }

    /// Predicts the category of `query`. Any label on `query` is ignored.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::InvalidDistance` if distance comparison fails (e.g., due to NaN values).
    pub fn predict(&self, query: &Sample<F>) -> Result<Category, KnnError> {
        let neighbors = self.neighbors(query)?;

        // Every reference sample was checked for a label in `new`.
        let predicted = majority_vote(neighbors.iter().filter_map(|n| n.sample.label()))
            .ok_or(KnnError::EmptyReference)?;

        trace!(
            k = self.k,
            nearest = neighbors[0].index,
            %predicted,
            "classified query"
        );
        Ok(predicted)
    }

    /// Predicts every query in order. The output has one entry per query.
    pub fn predict_all(&self, queries: &[Sample<F>]) -> Result<Vec<Category>, KnnError> {
        queries.iter().map(|query| self.predict(query)).collect()
    }
}

/// Predicts the category of `query` from its `k` nearest neighbors in
/// `reference`, using Euclidean distance.
///
/// # Errors
///
/// See [`KnnClassifier::new`] and [`KnnClassifier::predict`].
pub fn predict<F: Float>(
    reference: &[Sample<F>],
    query: &Sample<F>,
    k: usize,
) -> Result<Category, KnnError> {
    KnnClassifier::new(k, reference, L2Dist)?.predict(query)
}

/// Classifies each query independently against the same reference set.
///
/// Element `i` of the result equals `predict(reference, &queries[i], k)`.
pub fn predict_all<F: Float>(
    reference: &[Sample<F>],
    queries: &[Sample<F>],
    k: usize,
) -> Result<Vec<Category>, KnnError> {
    KnnClassifier::new(k, reference, L2Dist)?.predict_all(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokeclass_helpers::Category::{Pichu, Pikachu};

    fn two_clusters() -> Vec<Sample> {
        vec![
            Sample::labeled(1.0, 1.0, Pichu),
            Sample::labeled(2.0, 2.0, Pichu),
            Sample::labeled(1.0, 2.0, Pichu),
            Sample::labeled(8.0, 8.0, Pikachu),
            Sample::labeled(9.0, 8.0, Pikachu),
            Sample::labeled(8.0, 9.0, Pikachu),
        ]
    }

    #[test]
    fn test_knn_classification_simple() {
        let reference = two_clusters();

        // Create a classifier with k=3 and L2 (Euclidean) distance
        let classifier = KnnClassifier::new(3, &reference, L2Dist).unwrap();

        // Point close to the Pichu cluster
        let query = Sample::new(2.5, 2.5, None);
        assert_eq!(classifier.predict(&query).unwrap(), Pichu);

        // Point close to the Pikachu cluster
        let query = Sample::new(7.5, 8.5, None);
        assert_eq!(classifier.predict(&query).unwrap(), Pikachu);
    }

    #[test]
    fn test_knn_k_equal_to_dataset() {
        let reference = vec![
            Sample::labeled(1.0, 0.0, Pichu),
            Sample::labeled(2.0, 0.0, Pichu),
            Sample::labeled(10.0, 0.0, Pikachu),
        ];

        // The two Pichus outvote the one Pikachu even though it is in range.
        let classifier = KnnClassifier::new(3, &reference, L2Dist).unwrap();
        assert_eq!(classifier.predict(&Sample::new(9.0, 0.0, None)).unwrap(), Pichu);
    }

    #[test]
    fn test_query_label_is_ignored() {
        let reference = two_clusters();
        let query = Sample::labeled(8.5, 8.5, Pichu);
        assert_eq!(predict(&reference, &query, 1).unwrap(), Pikachu);
    }

    #[test]
    fn test_error_on_k_zero() {
        let reference = two_clusters();
        let result = KnnClassifier::new(0, &reference, L2Dist);
        assert!(matches!(result, Err(KnnError::InvalidK { k: 0 })));
    }

    #[test]
    fn test_error_on_empty_reference() {
        let reference: Vec<Sample> = vec![];
        let result = predict(&reference, &Sample::new(1.0, 1.0, None), 3);
        assert_eq!(result, Err(KnnError::EmptyReference));
    }

    #[test]
    fn test_error_on_k_too_large() {
        let reference = two_clusters();
        let result = predict(&reference, &Sample::new(1.0, 1.0, None), 7);
        assert_eq!(result, Err(KnnError::KTooLarge { k: 7, len: 6 }));
    }

    #[test]
    fn test_error_on_unlabeled_reference() {
        let mut reference = two_clusters();
        reference.push(Sample::new(5.0, 5.0, None));
        let result = predict(&reference, &Sample::new(1.0, 1.0, None), 1);
        assert_eq!(result, Err(KnnError::UnlabeledReference { index: 6 }));
    }

    #[test]
    fn test_error_on_nan() {
        let reference = two_clusters();
        let result = predict(&reference, &Sample::new(f64::NAN, 1.0, None), 1);
        assert_eq!(result, Err(KnnError::InvalidDistance));
    }

    #[test]
    fn test_k_nearest_sorted_and_sized() {
        let reference = two_clusters();
        let query = Sample::new(0.0, 0.0, None);
        let neighbors = k_nearest(&reference, &query, 4, &L2Dist).unwrap();

        assert_eq!(neighbors.len(), 4);
        let indices: Vec<usize> = neighbors.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![0, 2, 1, 3]);
        assert!(neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));
        approx::assert_abs_diff_eq!(neighbors[0].distance, 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_k_nearest_ties_keep_reference_order() {
        // Both candidates are exactly 1.0 away from the origin.
        let reference = vec![
            Sample::labeled(-1.0, 0.0, Pichu),
            Sample::labeled(1.0, 0.0, Pikachu),
        ];
        let query = Sample::new(0.0, 0.0, None);

        let neighbors = k_nearest(&reference, &query, 2, &L2Dist).unwrap();
        assert_eq!(neighbors[0].index, 0);
        assert_eq!(neighbors[1].index, 1);
        assert_eq!(predict(&reference, &query, 1).unwrap(), Pichu);

        let swapped: Vec<Sample> = reference.iter().rev().cloned().collect();
        assert_eq!(predict(&swapped, &query, 1).unwrap(), Pikachu);
    }

    #[test]
    fn test_vote_tie_goes_to_nearest_label() {
        let query = Sample::new(0.0, 0.0, None);

        let reference = vec![
            Sample::labeled(3.0, 0.0, Pichu),
            Sample::labeled(1.0, 0.0, Pikachu),
            Sample::labeled(2.0, 0.0, Pichu),
            Sample::labeled(4.0, 0.0, Pikachu),
        ];
        // k=4: two votes each, the nearest sample is a Pikachu.
        assert_eq!(predict(&reference, &query, 4).unwrap(), Pikachu);
        // k=2: Pikachu at 1.0, Pichu at 2.0.
        assert_eq!(predict(&reference, &query, 2).unwrap(), Pikachu);

        let reference = vec![
            Sample::labeled(1.0, 0.0, Pichu),
            Sample::labeled(2.0, 0.0, Pikachu),
        ];
        assert_eq!(predict(&reference, &query, 2).unwrap(), Pichu);
    }

    #[test]
    fn test_majority_vote() {
        assert_eq!(majority_vote(Vec::new()), None);
        assert_eq!(majority_vote([Pichu]), Some(Pichu));
        assert_eq!(majority_vote([Pichu, Pikachu, Pikachu]), Some(Pikachu));
        assert_eq!(majority_vote([Pikachu, Pichu]), Some(Pikachu));
        assert_eq!(majority_vote([Pichu, Pikachu]), Some(Pichu));
        assert_eq!(
            majority_vote([Pikachu, Pichu, Pichu, Pikachu]),
            Some(Pikachu)
        );
    }

    #[test]
    fn test_predict_all_empty_queries() {
        let reference = two_clusters();
        assert!(predict_all(&reference, &[], 1).unwrap().is_empty());
    }

    #[test]
    fn test_predict_all_rejects_bad_k_even_without_queries() {
        let reference = two_clusters();
        assert_eq!(
            predict_all(&reference, &[], 0),
            Err(KnnError::InvalidK { k: 0 })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(KnnError::InvalidK { k: 0 }.to_string(), "k must be >= 1, got 0");
        assert_eq!(
            KnnError::KTooLarge { k: 10, len: 8 }.to_string(),
            "k = 10 exceeds the reference set size 8"
        );
        assert_eq!(
            KnnError::UnlabeledReference { index: 3 }.to_string(),
            "reference sample 3 has no label"
        );
    }
}
