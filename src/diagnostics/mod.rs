//! Diagnostics data model returned by the multi-scale detector.
//!
//! `DetectionReport` bundles the final boxes with an input descriptor, one
//! [`LevelReport`] per evaluated scale, the merge outcome and a timing
//! breakdown. Everything serialises to camelCase JSON.

pub mod merge;
pub mod pipeline;
pub mod pyramid;
pub mod timing;

pub use merge::MergeStage;
pub use pipeline::{DetectionReport, InputDescriptor};
pub use pyramid::LevelReport;
pub use timing::{StageTiming, TimingBreakdown};
