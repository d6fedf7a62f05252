//! Sliding-window object detection over a scale pyramid.
//!
//! Overview
//! - [`ScalePyramid`](crate::pyramid::ScalePyramid) lists the scales at which
//!   the fixed classifier window still fits the image.
//! - At every scale the resized image is scanned on a stride grid; each
//!   window is described by the [`FeatureExtractor`](crate::features::FeatureExtractor)
//!   and labelled by the [`Classifier`](crate::classifier::Classifier).
//! - Positive windows of one scale are grouped with a greedy,
//!   order-dependent linkage ([`clustering`]) and each group is reduced to
//!   the centre of its minimal enclosing circle.
//! - Representatives are mapped back to full-resolution boxes and merged
//!   across scales by intersection over minimum area ([`merge`]), with an
//!   optional inward shrink.
//!
//! Modules
//! - [`params`] – detector configuration and the [`Quirks`] switch.
//! - [`clustering`] – window overlap and the greedy cluster arena.
//! - [`single`] – one scale, one image.
//! - [`merge`] – cross-scale overlap, merge and shrink.
//! - `pipeline` – the [`Detector`] tying everything together.
//! - `dump` – optional on-disk dump of positive patches.
//!
//! With the `parallel` feature scale levels run on the rayon pool; results
//! are gathered in level order before the merge, so the output does not
//! depend on the feature.

pub mod clustering;
mod dump;
pub mod merge;
pub mod params;
mod pipeline;
pub mod single;
#[cfg(test)]
mod test_support;

pub use clustering::{cluster_detections, window_overlap, Cluster, ClusterSet};
pub use dump::PatchDump;
pub use merge::{merge_boxes, overlap_area, shrink_box};
pub use params::{DetectorParams, Quirks};
pub use pipeline::Detector;
pub use single::{ScaleDetections, SingleScaleDetector};
