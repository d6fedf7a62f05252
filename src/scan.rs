//! Exhaustive window enumeration over a single image.
//!
//! Origins lie on a regular grid `x ∈ {0, sx, 2sx, …} ≤ W − w`,
//! `y ∈ {0, sy, 2sy, …} ≤ H − h`, visited row-major by `(y, x)`. The last
//! row/column that still fits is included. Patches are borrowed views into
//! the scanned image, so the iterator is lazy and allocation-free.
use crate::error::DetectError;
use crate::image::ImageU8;
use crate::types::{Origin, Stride, WindowSize};

/// A window origin together with the patch it covers.
#[derive(Clone, Copy, Debug)]
pub struct Window<'a> {
    pub origin: Origin,
    pub patch: ImageU8<'a>,
}

/// Enumerates fixed-size windows on a stride grid.
#[derive(Clone, Copy, Debug)]
pub struct WindowScanner {
    window: WindowSize,
    stride: Stride,
}

impl WindowScanner {
    pub fn new(window: WindowSize, stride: Stride) -> Result<Self, DetectError> {
        if window.is_empty() {
            return Err(DetectError::EmptyWindow);
        }
        if stride.x == 0 || stride.y == 0 {
            return Err(DetectError::InvalidStride(stride));
        }
        Ok(Self { window, stride })
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }

    pub fn stride(&self) -> Stride {
        self.stride
    }

    /// Number of windows a `width × height` image yields (0 if none fit).
    pub fn window_count(&self, width: usize, height: usize) -> usize {
        if !self.window.fits(width, height) {
            return 0;
        }
        let cols = (width - self.window.w) / self.stride.x + 1;
        let rows = (height - self.window.h) / self.stride.y + 1;
        cols * rows
    }

    /// Start scanning `image`. Fails if the image is smaller than the window.
    pub fn scan<'a>(&self, image: ImageU8<'a>) -> Result<Windows<'a>, DetectError> {
        if !self.window.fits(image.w, image.h) {
            return Err(DetectError::WindowTooLarge {
                window: self.window,
                image_width: image.w,
                image_height: image.h,
            });
        }
        Ok(Windows {
            image,
            window: self.window,
            stride: self.stride,
            x: 0,
            y: 0,
            remaining: self.window_count(image.w, image.h),
        })
    }
}

/// Lazy row-major iterator over the windows of one image.
#[derive(Clone, Debug)]
pub struct Windows<'a> {
    image: ImageU8<'a>,
    window: WindowSize,
    stride: Stride,
    x: usize,
    y: usize,
    remaining: usize,
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let origin = Origin::new(self.x, self.y);
        // `scan` only starts when the window fits and the grid never leaves
        // the image, so the view always exists.
        let Some(patch) = self
            .image
            .sub_view(self.x, self.y, self.window.w, self.window.h)
        else {
            debug_assert!(false, "window at ({}, {}) leaves the image", self.x, self.y);
            self.remaining = 0;
            return None;
        };

        self.remaining -= 1;
        self.x += self.stride.x;
        if self.x + self.window.w > self.image.w {
            self.x = 0;
            self.y += self.stride.y;
        }
        Some(Window { origin, patch })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Windows<'_> {}
