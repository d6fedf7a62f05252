//! Error type shared by the detection engine.
//!
//! External collaborators (feature extractors, classifiers) report failures as
//! [`BoxError`]; the engine wraps them without altering the original error,
//! which stays reachable through [`std::error::Error::source`].
use crate::types::{Stride, WindowSize};

/// Boxed error returned by feature extractors and classifiers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("detect window {}x{} does not fit a {image_width}x{image_height} image", .window.w, .window.h)]
    WindowTooLarge {
        window: WindowSize,
        image_width: usize,
        image_height: usize,
    },

    #[error("detect window must have a positive width and height")]
    EmptyWindow,

    #[error("window stride must be positive, got ({}, {})", .0.x, .0.y)]
    InvalidStride(Stride),

    #[error("scale step must lie in (0, 1), got {0}")]
    InvalidScaleStep(f64),

    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("shrink factors must lie in (0, 1], got ({fx}, {fy})")]
    InvalidShrinkFactor { fx: f64, fy: f64 },

    #[error("feature extraction failed")]
    FeatureExtraction(#[source] BoxError),

    #[error("classification failed")]
    Classification(#[source] BoxError),

    #[error("feature extractor returned {got} rows for {expected} patches")]
    FeatureCountMismatch { expected: usize, got: usize },

    #[error("classifier returned {got} labels for {expected} feature vectors")]
    LabelCountMismatch { expected: usize, got: usize },
}
