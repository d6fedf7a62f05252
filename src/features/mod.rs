//! Patch descriptors consumed by the classifier.
//!
//! A [`FeatureExtractor`] is configured for one window geometry and turns a
//! batch of patches of exactly that size into a [`FeatureMatrix`] with one
//! row per patch. The detector treats extractors as opaque collaborators:
//! anything implementing the trait (a gradient histogram, raw pixels, or a
//! test stub) can be plugged in.

mod grad;
mod hog;
mod pixels;

pub use grad::{central_gradients, Gradients};
pub use hog::{HogExtractor, HogParams};
pub use pixels::PixelExtractor;

use crate::error::BoxError;
use crate::image::ImageU8;
use crate::types::WindowSize;
use nalgebra::DMatrix;

/// Batch of feature vectors, one row per patch.
pub type FeatureMatrix = DMatrix<f32>;

pub trait FeatureExtractor: Send + Sync {
    /// Window geometry every patch must have.
    fn window_size(&self) -> WindowSize;

    /// Length of one feature vector.
    fn feature_len(&self) -> usize;

    /// Describe a single patch into `out` (`out.len() == feature_len()`).
    fn describe(&self, patch: &ImageU8<'_>, out: &mut [f32]) -> Result<(), BoxError>;

    /// Describe a batch of patches.
    fn process(&self, patches: &[ImageU8<'_>]) -> Result<FeatureMatrix, BoxError> {
        let len = self.feature_len();
        if len == 0 {
            return Err("feature extractor produces empty vectors".into());
        }
        let window = self.window_size();
        let mut flat = vec![0.0f32; patches.len() * len];
        for (patch, row) in patches.iter().zip(flat.chunks_exact_mut(len)) {
            if patch.w != window.w || patch.h != window.h {
                return Err(format!(
                    "patch {}x{} does not match window {}x{}",
                    patch.w, patch.h, window.w, window.h
                )
                .into());
            }
            self.describe(patch, row)?;
        }
        Ok(DMatrix::from_row_slice(patches.len(), len, &flat))
    }
}
