use super::FeatureExtractor;
use crate::error::BoxError;
use crate::image::{ImageU8, ImageView};
use crate::types::WindowSize;

/// Raw intensities scaled to `[0, 1]`, row-major.
#[derive(Clone, Copy, Debug)]
pub struct PixelExtractor {
    window: WindowSize,
}

impl PixelExtractor {
    pub fn new(window: WindowSize) -> Self {
        Self { window }
    }
}

impl FeatureExtractor for PixelExtractor {
    fn window_size(&self) -> WindowSize {
        self.window
    }

    fn feature_len(&self) -> usize {
        self.window.area()
    }

    fn describe(&self, patch: &ImageU8<'_>, out: &mut [f32]) -> Result<(), BoxError> {
        for (dst_row, src_row) in out.chunks_exact_mut(patch.w.max(1)).zip(patch.rows()) {
            for (dst, &px) in dst_row.iter_mut().zip(src_row) {
                *dst = px as f32 / 255.0;
            }
        }
        Ok(())
    }
}
