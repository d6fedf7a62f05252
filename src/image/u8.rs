//! Borrowed 8-bit grayscale view with an explicit row stride.
//!
//! Window patches are views into their parent image: they share its buffer
//! and stride, so scanning never copies pixels.
use super::f32::ImageF32;
use super::traits::ImageView;

#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Wrap a tightly packed buffer (`stride == w`).
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Self {
        debug_assert!(data.len() >= w * h, "buffer smaller than {w}x{h}");
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Borrow the `w × h` region whose top-left corner is `(x, y)`.
    ///
    /// Returns `None` when the region leaves the image.
    pub fn sub_view(&self, x: usize, y: usize, w: usize, h: usize) -> Option<ImageU8<'a>> {
        if x + w > self.w || y + h > self.h {
            return None;
        }
        if w == 0 || h == 0 {
            return Some(ImageU8 {
                w,
                h,
                stride: self.stride,
                data: &[],
            });
        }
        let start = y * self.stride + x;
        let end = (y + h - 1) * self.stride + x + w;
        Some(ImageU8 {
            w,
            h,
            stride: self.stride,
            data: &self.data[start..end],
        })
    }

    /// Convert to a float image with intensities in `[0, 1]`.
    pub fn to_f32(&self) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for y in 0..self.h {
            let src = self.row(y);
            let start = out.idx(0, y);
            for (dst, &px) in out.data[start..start + self.w].iter_mut().zip(src) {
                *dst = px as f32 / 255.0;
            }
        }
        out
    }

    /// Sum of all intensities (0..=255 per pixel).
    pub fn sum(&self) -> u64 {
        self.rows()
            .map(|r| r.iter().map(|&v| u64::from(v)).sum::<u64>())
            .sum()
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then(|| &self.data[..self.w * self.h])
    }
}
