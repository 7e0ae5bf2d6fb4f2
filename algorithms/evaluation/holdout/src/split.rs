//! Stratified train/test splitting.

use pokeclass_helpers::{Float, Sample};
use rand::Rng;
use rand::seq::{SliceRandom, index};

use crate::error::HoldoutError;

/// One iteration's disjoint training and test sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<F: Float> {
    /// `training_amount` samples from each pool, shuffled together.
    pub training: Vec<Sample<F>>,
    /// `test_amount` samples from each pool, shuffled together. Labels kept.
    pub test: Vec<Sample<F>>,
}

/// Draws a stratified split from two pools.
///
/// Each pool is permuted independently; its first `training_amount` samples
/// go to training and the next `test_amount` to test, so no sample appears in
/// both. The combined sets are then shuffled. The pools themselves are only
/// read, the returned sets hold copies.
///
/// # Errors
///
/// Returns `HoldoutError::AmountOverflow` if `training_amount + test_amount`
/// does not fit in a `usize`, and `HoldoutError::PoolTooSmall` if either pool
/// holds fewer than that many samples.
pub fn stratified_split<F, R>(
    pool_a: &[Sample<F>],
    pool_b: &[Sample<F>],
    training_amount: usize,
    test_amount: usize,
    rng: &mut R,
) -> Result<Split<F>, HoldoutError>
where
    F: Float,
    R: Rng + ?Sized,
{
    let required = training_amount
        .checked_add(test_amount)
        .ok_or(HoldoutError::AmountOverflow {
            training_amount,
            test_amount,
        })?;
    check_size("first", pool_a, required)?;
    check_size("second", pool_b, required)?;

    let mut training = Vec::with_capacity(2 * training_amount);
    let mut test = Vec::with_capacity(2 * test_amount);

    for pool in [pool_a, pool_b] {
        // `required` distinct indices in random order: the head of a fresh
        // permutation of the pool.
        let picks = index::sample(rng, pool.len(), required).into_vec();
        let (train_idx, test_idx) = picks.split_at(training_amount);
        training.extend(train_idx.iter().map(|&i| pool[i].clone()));
        test.extend(test_idx.iter().map(|&i| pool[i].clone()));
    }

    training.shuffle(rng);
    test.shuffle(rng);

    Ok(Split { training, test })
}

pub(crate) fn check_size<F: Float>(
    name: &'static str,
    pool: &[Sample<F>],
    required: usize,
) -> Result<(), HoldoutError> {
    if pool.len() < required {
        return Err(HoldoutError::PoolTooSmall {
            pool: name,
            required,
            available: pool.len(),
        });
    }
    Ok(())
}
