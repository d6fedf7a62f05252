//! Mapping detections from a scale level back to full resolution.
use crate::types::{round_half_up, BoundingBox, Origin, WindowSize};

/// Scale factor of a level relative to the full-resolution image.
#[derive(Clone, Copy, Debug)]
pub struct LevelScaling {
    pub scale_from_full: f64,
}

impl LevelScaling {
    pub fn new(scale_from_full: f64) -> Self {
        Self { scale_from_full }
    }

    /// Window placed at `origin` in level space, expressed as a box in the
    /// full image (each coordinate rounded to the nearest pixel).
    pub fn window_to_full(&self, origin: Origin, window: WindowSize) -> BoundingBox {
        let s = self.scale_from_full;
        BoundingBox {
            x0: round_half_up(origin.x as f64 / s),
            y0: round_half_up(origin.y as f64 / s),
            x1: round_half_up((origin.x + window.w) as f64 / s),
            y1: round_half_up((origin.y + window.h) as f64 / s),
        }
    }
}
