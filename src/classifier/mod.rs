//! Binary patch classifiers.
//!
//! The detector only needs `predict`; `train` is part of the capability so
//! that concrete models can be fitted through the same interface they are
//! used through.

mod linear;

pub use linear::{LinearClassifier, PerceptronParams};

use crate::error::BoxError;
use crate::features::FeatureMatrix;
use serde::{Deserialize, Serialize};

/// Class assigned to one feature vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    #[inline]
    pub fn is_positive(self) -> bool {
        self == Label::Positive
    }

    /// Map a `{0, 1}` class id; anything else is rejected.
    pub fn from_class(class: i32) -> Option<Self> {
        match class {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    /// `+1` for positives, `-1` for negatives.
    #[inline]
    pub fn sign(self) -> f32 {
        if self.is_positive() {
            1.0
        } else {
            -1.0
        }
    }
}

impl From<bool> for Label {
    fn from(positive: bool) -> Self {
        if positive {
            Label::Positive
        } else {
            Label::Negative
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label as u8
    }
}

pub trait Classifier: Send + Sync {
    /// Fit the model to `features` (one row per sample) and `labels`.
    fn train(&mut self, features: &FeatureMatrix, labels: &[Label]) -> Result<(), BoxError>;

    /// One label per row of `features`.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>, BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_ids_round_trip() {
        assert_eq!(Label::from_class(1), Some(Label::Positive));
        assert_eq!(Label::from_class(0), Some(Label::Negative));
        assert_eq!(Label::from_class(2), None);
        assert_eq!(u8::from(Label::Positive), 1);
        assert_eq!(u8::from(Label::Negative), 0);
        assert_eq!(Label::from(true), Label::Positive);
    }
}
