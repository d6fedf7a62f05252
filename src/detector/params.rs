//! Parameter types configuring the detector.
//!
//! All thresholds are caller-supplied constants; nothing here is learned.
//! Defaults reproduce the values the detector was originally tuned with
//! (stride 8, 5% scale step, 0.6 hit threshold, 0.72 group threshold).

use crate::error::DetectError;
use crate::types::{ShrinkFactors, Stride};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Compatibility switch for two arithmetic quirks of earlier versions of the
/// detector.
///
/// - `Corrected` (default): cross-scale overlap uses the symmetric
///   intersection (max of starts, min of ends on both axes) and the shrink
///   pass offsets `y0` by the vertical delta.
/// - `Legacy`: overlap takes `max` of the end corners on x but `min` on y,
///   and the shrink pass offsets `y0` by the horizontal delta. Use it only to
///   reproduce old outputs bit for bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quirks {
    #[default]
    Corrected,
    Legacy,
}

/// Detector-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Clustering tolerance: two windows belong together when they share at
    /// least `1 - hit_threshold` of their footprint.
    pub hit_threshold: f64,
    /// Window step in level pixels.
    pub stride: Stride,
    /// Ratio between consecutive pyramid scales, in `(0, 1)`.
    pub scale_step: f64,
    /// Minimum intersection-over-minimum-area for merging boxes across scales.
    pub group_threshold: f64,
    /// Shrink the final boxes by `shrink`.
    pub fit: bool,
    pub shrink: ShrinkFactors,
    /// Stop after this many levels (finest first).
    pub max_levels: Option<usize>,
    /// Number of patches handed to the extractor/classifier at once; `0`
    /// sends every window of a level in one batch.
    pub batch_size: usize,
    pub quirks: Quirks,
    /// Write every positive window under this directory.
    pub debug_dir: Option<PathBuf>,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            hit_threshold: 0.6,
            stride: Stride::new(8, 8),
            scale_step: 0.95,
            group_threshold: 0.72,
            fit: false,
            shrink: ShrinkFactors::default(),
            max_levels: None,
            batch_size: 512,
            quirks: Quirks::Corrected,
            debug_dir: None,
        }
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<(), DetectError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DetectError::InvalidThreshold { name, value })
    }
}

impl DetectorParams {
    pub fn validate(&self) -> Result<(), DetectError> {
        check_unit("hit_threshold", self.hit_threshold)?;
        check_unit("group_threshold", self.group_threshold)?;
        if self.stride.x == 0 || self.stride.y == 0 {
            return Err(DetectError::InvalidStride(self.stride));
        }
        if !(self.scale_step > 0.0 && self.scale_step < 1.0) {
            return Err(DetectError::InvalidScaleStep(self.scale_step));
        }
        let ShrinkFactors { fx, fy } = self.shrink;
        if self.fit && !(fx > 0.0 && fx <= 1.0 && fy > 0.0 && fy <= 1.0) {
            return Err(DetectError::InvalidShrinkFactor { fx, fy });
        }
        Ok(())
    }
}
