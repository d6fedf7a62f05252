use serde::{Deserialize, Serialize};

/// Fixed window geometry required by the classifier, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSize {
    pub w: usize,
    pub h: usize,
}

impl WindowSize {
    pub const fn new(w: usize, h: usize) -> Self {
        Self { w, h }
    }

    /// Window footprint in pixels.
    #[inline]
    pub fn area(&self) -> usize {
        self.w * self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Whether an image of `width × height` admits at least one window.
    #[inline]
    pub fn fits(&self, width: usize, height: usize) -> bool {
        width >= self.w && height >= self.h
    }
}

/// Step between consecutive window origins along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stride {
    pub x: usize,
    pub y: usize,
}

impl Stride {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Default for Stride {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

/// Top-left corner of a window in the pixel space of one scale level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Origin {
    pub x: usize,
    pub y: usize,
}

impl Origin {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned integer rectangle `[x0, x1) × [y0, y1)` in original-image
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Area in pixels; zero for degenerate boxes.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            i64::from(self.width()) * i64::from(self.height())
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub fn center(&self) -> [f32; 2] {
        [
            0.5 * (self.x0 + self.x1) as f32,
            0.5 * (self.y0 + self.y1) as f32,
        ]
    }

    /// Clamp the box to `[0, width] × [0, height]`.
    pub fn clip(&self, width: usize, height: usize) -> Self {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            x0: self.x0.clamp(0, w),
            y0: self.y0.clamp(0, h),
            x1: self.x1.clamp(0, w),
            y1: self.y1.clamp(0, h),
        }
    }
}

/// Fraction of each box side kept by the optional shrink ("fit") pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShrinkFactors {
    pub fx: f64,
    pub fy: f64,
}

impl Default for ShrinkFactors {
    fn default() -> Self {
        Self { fx: 0.75, fy: 0.85 }
    }
}

/// Round half away from negative infinity, matching `int(v + 0.5)` on the
/// non-negative coordinates the detector produces.
#[inline]
pub(crate) fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
