//! Stubs shared by the detector unit tests.
use crate::error::BoxError;
use crate::features::FeatureExtractor;
use crate::image::ImageU8;
use crate::types::WindowSize;

/// One feature: mean intensity in `[0, 1]`.
pub(crate) struct MeanIntensity(pub WindowSize);

impl FeatureExtractor for MeanIntensity {
    fn window_size(&self) -> WindowSize {
        self.0
    }

    fn feature_len(&self) -> usize {
        1
    }

    fn describe(&self, patch: &ImageU8<'_>, out: &mut [f32]) -> Result<(), BoxError> {
        out[0] = patch.sum() as f32 / (patch.w * patch.h * 255) as f32;
        Ok(())
    }
}

/// Black `w × h` image with white `side × side` squares at `corners`.
pub(crate) fn squares_image(w: usize, h: usize, corners: &[(usize, usize)], side: usize) -> Vec<u8> {
    let mut data = vec![0u8; w * h];
    for &(x0, y0) in corners {
        for y in y0..y0 + side {
            data[y * w + x0..y * w + x0 + side].fill(255);
        }
    }
    data
}
