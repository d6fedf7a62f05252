//! Geometric scale pyramid for the sliding-window search.
//!
//! Design
//! - The window geometry is fixed by the classifier, so objects of different
//!   apparent sizes are found by shrinking the image instead of growing the
//!   window. Level `i` uses the factor `scale_step^i`.
//! - The finest level is the input itself (`s = 1`). The coarsest level is
//!   the last one at which the resized image still admits one window:
//!   with `t = max(h / H, w / W)` the pyramid holds
//!   `L = floor(ln t / ln scale_step) + 1` levels.
//! - Level images are produced lazily by the detector; the pyramid only
//!   describes factors and resized dimensions, so it is cheap to build and
//!   can be iterated any number of times.
//!
//! Complexity
//! - O(L) to generate; resized level `i` costs O(s_i² · W · H) to scan.

mod scaling;

pub use scaling::LevelScaling;

use crate::error::DetectError;
use crate::types::{round_half_up, WindowSize};
use serde::Serialize;

/// Slack absorbing `ln()` rounding when the window fits a level exactly.
const LEVEL_COUNT_EPS: f64 = 1e-9;

/// One level of the pyramid: a scale factor and the resized image size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLevel {
    pub index: usize,
    pub scale: f64,
    pub width: usize,
    pub height: usize,
}

impl ScaleLevel {
    /// Mapping from this level's pixel space back to the full image.
    pub fn scaling(&self) -> LevelScaling {
        LevelScaling::new(self.scale)
    }
}

/// Strictly decreasing sequence of scale levels, finest first.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ScalePyramid {
    levels: Vec<ScaleLevel>,
}

impl ScalePyramid {
    /// Build the pyramid for an `image_w × image_h` input and a fixed window.
    ///
    /// Fails when the window does not fit the image at full scale or when
    /// `scale_step` is outside `(0, 1)`.
    pub fn generate(
        image_w: usize,
        image_h: usize,
        window: WindowSize,
        scale_step: f64,
    ) -> Result<Self, DetectError> {
        if window.is_empty() {
            return Err(DetectError::EmptyWindow);
        }
        if !(scale_step > 0.0 && scale_step < 1.0) {
            return Err(DetectError::InvalidScaleStep(scale_step));
        }
        if !window.fits(image_w, image_h) {
            return Err(DetectError::WindowTooLarge {
                window,
                image_width: image_w,
                image_height: image_h,
            });
        }

        let t = (window.h as f64 / image_h as f64).max(window.w as f64 / image_w as f64);
        let count = ((t.ln() / scale_step.ln()) + LEVEL_COUNT_EPS).floor() as usize + 1;

        let mut levels = Vec::with_capacity(count);
        for index in 0..count {
            let scale = scale_step.powi(index as i32);
            let width = round_half_up(scale * image_w as f64).max(0) as usize;
            let height = round_half_up(scale * image_h as f64).max(0) as usize;
            // Rounding the resized size may drop it one pixel below the
            // window at the boundary level.
            if !window.fits(width, height) {
                break;
            }
            levels.push(ScaleLevel {
                index,
                scale,
                width,
                height,
            });
        }
        Ok(Self { levels })
    }

    /// Keep at most `max_levels` of the finest levels; `0` leaves the
    /// pyramid empty.
    pub fn truncated(mut self, max_levels: usize) -> Self {
        self.levels.truncate(max_levels);
        self
    }

    pub fn levels(&self) -> &[ScaleLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScaleLevel> {
        self.levels.iter()
    }
}

impl<'a> IntoIterator for &'a ScalePyramid {
    type Item = &'a ScaleLevel;
    type IntoIter = std::slice::Iter<'a, ScaleLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}
