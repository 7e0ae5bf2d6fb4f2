use ndarray::{NdFloat, ScalarOperand};

use num_traits::{FromPrimitive, Signed};
use rand::distr::uniform::SampleUniform;

use std::iter::Sum;

// Include submodules
mod common;
mod distance;

// Re-export types from submodules
pub use common::{Category, Sample, SampleError};
pub use distance::{euclidean, Distance, L2Dist};

/// Floating point type usable for sample features.
pub trait Float:
    NdFloat + FromPrimitive + Default + Signed + Sum + SampleUniform + ScalarOperand + std::marker::Unpin
{
}

impl Float for f32 {}

impl Float for f64 {}
