use ndarray::{array, Array1, ArrayView1};
use crate::Float;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Errors raised when building a [`Sample`] from untrusted input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// A measurement was below zero.
    #[error("{name} must be >= 0, got {value}")]
    NegativeFeature {
        /// Which feature was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A measurement was NaN or infinite.
    #[error("{name} must be a finite number")]
    NonFiniteFeature {
        /// Which feature was rejected.
        name: &'static str,
    },

    /// A label code outside the two known categories.
    #[error("unknown category code {code}, expected 0 (Pichu) or 1 (Pikachu)")]
    UnknownCategory {
        /// The offending code.
        code: i64,
    },
}

/// The two classes a measurement can belong to.
///
/// The integer codes match the labeled data files: `0` is Pichu, `1` is Pikachu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Category {
    Pichu,
    Pikachu,
}

impl Category {
    /// Both categories, in code order.
    pub const ALL: [Category; 2] = [Category::Pichu, Category::Pikachu];

    /// The integer code used by the data files.
    pub fn code(self) -> u8 {
        match self {
            Category::Pichu => 0,
            Category::Pikachu => 1,
        }
    }
}

impl TryFrom<i64> for Category {
    type Error = SampleError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Category::Pichu),
            1 => Ok(Category::Pikachu),
            _ => Err(SampleError::UnknownCategory { code }),
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = SampleError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Category::try_from(i64::from(code))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Category::Pichu => write!(f, "Pichu"),
            Category::Pikachu => write!(f, "Pikachu"),
        }
    }
}

/// A single measurement: two features (width, height) and an optional label.
///
/// Samples are immutable once built. Reference and ground-truth samples carry
/// a label; query samples awaiting prediction do not.
///
/// F: The float type for the features (e.g., f32, f64).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Sample<F = f64>
where
    F: Float,
{
    features: Array1<F>,
    label: Option<Category>,
}

impl<F> Sample<F>
where
    F: Float,
{
    /// Builds a sample from trusted values without range checks.
    pub fn new(feature_a: F, feature_b: F, label: Option<Category>) -> Self {
        Sample {
            features: array![feature_a, feature_b],
            label,
        }
    }

    /// Builds a labeled reference sample.
    pub fn labeled(feature_a: F, feature_b: F, label: Category) -> Self {
        Self::new(feature_a, feature_b, Some(label))
    }

    /// Builds an unlabeled query sample from user-supplied measurements.
    ///
    /// # Errors
    ///
    /// Returns `SampleError::NonFiniteFeature` for NaN or infinite values and
    /// `SampleError::NegativeFeature` for values below zero.
    pub fn measured(width: F, height: F) -> Result<Self, SampleError> {
        check_measurement("width", width)?;
        check_measurement("height", height)?;
        Ok(Self::new(width, height, None))
    }

    pub fn feature_a(&self) -> F {
        self.features[0]
    }

    pub fn feature_b(&self) -> F {
        self.features[1]
    }

    /// Both features as a view, for use with a [`crate::Distance`].
    pub fn features(&self) -> ArrayView1<'_, F> {
        self.features.view()
    }

    pub fn label(&self) -> Option<Category> {
        self.label
    }

    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }

    /// A copy of this sample with the label stripped.
    pub fn unlabeled(&self) -> Self {
        Sample {
            features: self.features.clone(),
            label: None,
        }
    }
}

fn check_measurement<F: Float>(name: &'static str, value: F) -> Result<(), SampleError> {
    if !value.is_finite() {
        return Err(SampleError::NonFiniteFeature { name });
    }
    if value < F::zero() {
        return Err(SampleError::NegativeFeature {
            name,
            value: value.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}
