#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod classifier;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod features;
pub mod image;
pub mod types;

// Building blocks the detector is assembled from.
pub mod config;
pub mod geometry;
pub mod pyramid;
pub mod scan;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector, parameters and results.
pub use crate::detector::{Detector, DetectorParams, Quirks};
pub use crate::error::{BoxError, DetectError};
pub use crate::types::{BoundingBox, Origin, ShrinkFactors, Stride, WindowSize};

// Collaborator capabilities and the bundled implementations.
pub use crate::classifier::{Classifier, Label, LinearClassifier};
pub use crate::features::{FeatureExtractor, FeatureMatrix, HogExtractor, HogParams};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::DetectionReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use window_detector::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8::packed(w, h, &gray);
///
/// let hog = HogExtractor::new(HogParams::default())?;
/// let model = LinearClassifier::zeros(hog.feature_len());
/// let det = Detector::new(hog, model, DetectorParams::default())?;
///
/// let boxes = det.detect_multi_scale(img)?;
/// println!("found {} boxes", boxes.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{
        BoundingBox, Classifier, Detector, DetectorParams, FeatureExtractor, HogExtractor,
        HogParams, LinearClassifier,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::detector::clustering::{cluster_detections, window_overlap, Cluster, ClusterSet};
    pub use crate::detector::merge::{average_boxes, box_overlap, merge_boxes, shrink_box};
    pub use crate::detector::single::{ScaleDetections, SingleScaleDetector};
    pub use crate::diagnostics::{
        InputDescriptor, LevelReport, MergeStage, StageTiming, TimingBreakdown,
    };
    pub use crate::geometry::{min_enclosing_circle, Circle};
    pub use crate::pyramid::{ScaleLevel, ScalePyramid};
    pub use crate::scan::{Window, WindowScanner, Windows};
}
