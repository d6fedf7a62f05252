use window_detector::error::BoxError;
use window_detector::features::{FeatureExtractor, FeatureMatrix};
use window_detector::classifier::{Classifier, Label};
use window_detector::image::ImageU8;
use window_detector::types::WindowSize;

/// Black image with white `side × side` squares whose top-left corners are
/// listed in `corners`.
pub fn bright_squares_u8(
    width: usize,
    height: usize,
    corners: &[(usize, usize)],
    side: usize,
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = vec![0u8; width * height];
    for &(x0, y0) in corners {
        assert!(
            x0 + side <= width && y0 + side <= height,
            "square at ({x0}, {y0}) leaves the image"
        );
        for y in y0..y0 + side {
            img[y * width + x0..y * width + x0 + side].fill(255);
        }
    }
    img
}

/// Single feature: mean intensity of the patch scaled to `[0, 1]`.
pub struct MeanIntensity {
    pub window: WindowSize,
}

impl MeanIntensity {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            window: WindowSize::new(w, h),
        }
    }
}

impl FeatureExtractor for MeanIntensity {
    fn window_size(&self) -> WindowSize {
        self.window
    }

    fn feature_len(&self) -> usize {
        1
    }

    fn describe(&self, patch: &ImageU8<'_>, out: &mut [f32]) -> Result<(), BoxError> {
        out[0] = patch.sum() as f32 / (patch.w * patch.h * 255) as f32;
        Ok(())
    }
}

/// Error raised by [`FailingClassifier`].
#[derive(Debug)]
pub struct ModelUnavailable;

impl std::fmt::Display for ModelUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("model unavailable")
    }
}

impl std::error::Error for ModelUnavailable {}

/// Classifier whose `predict` always fails.
pub struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn train(&mut self, _: &FeatureMatrix, _: &[Label]) -> Result<(), BoxError> {
        Err(Box::new(ModelUnavailable))
    }

    fn predict(&self, _: &FeatureMatrix) -> Result<Vec<Label>, BoxError> {
        Err(Box::new(ModelUnavailable))
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
