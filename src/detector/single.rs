//! Detection on one image at one scale.
//!
//! Every window the scanner yields is described and classified in batches;
//! positive origins are kept in scan order, grouped with the greedy linkage
//! of [`super::clustering`], and each cluster is reduced to the centre of
//! its minimal enclosing circle.
use super::clustering::{cluster_detections, Cluster};
use super::dump::PatchDump;
use crate::classifier::Classifier;
use crate::error::DetectError;
use crate::features::FeatureExtractor;
use crate::image::ImageU8;
use crate::scan::{Window, WindowScanner};
use crate::types::{Origin, Stride};

/// Result of one single-scale pass, in the scanned image's pixel space.
#[derive(Clone, Debug, Default)]
pub struct ScaleDetections {
    /// Number of windows evaluated.
    pub windows: usize,
    /// Positive window origins in scan order.
    pub raw: Vec<Origin>,
    pub clusters: Vec<Cluster>,
    /// One representative origin per cluster.
    pub centroids: Vec<Origin>,
}

/// Sliding-window detector bound to a borrowed extractor and classifier.
pub struct SingleScaleDetector<'d, F: ?Sized, C: ?Sized> {
    extractor: &'d F,
    classifier: &'d C,
    scanner: WindowScanner,
    hit_threshold: f64,
    batch_size: usize,
    dump: Option<&'d PatchDump>,
    level_index: usize,
}

impl<'d, F, C> SingleScaleDetector<'d, F, C>
where
    F: FeatureExtractor + ?Sized,
    C: Classifier + ?Sized,
{
    pub fn new(
        extractor: &'d F,
        classifier: &'d C,
        stride: Stride,
        hit_threshold: f64,
    ) -> Result<Self, DetectError> {
        let scanner = WindowScanner::new(extractor.window_size(), stride)?;
        Ok(Self {
            extractor,
            classifier,
            scanner,
            hit_threshold,
            batch_size: 0,
            dump: None,
            level_index: 0,
        })
    }

    /// Patches per extractor/classifier call; `0` means one batch per image.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Write positive patches through `dump`, tagged with `level_index`.
    pub fn with_dump(mut self, dump: Option<&'d PatchDump>, level_index: usize) -> Self {
        self.dump = dump;
        self.level_index = level_index;
        self
    }

    pub fn scanner(&self) -> &WindowScanner {
        &self.scanner
    }

    pub fn detect(&self, image: ImageU8<'_>) -> Result<ScaleDetections, DetectError> {
        let windows = self.scanner.scan(image)?;
        let total = windows.len();
        let batch = match self.batch_size {
            0 => total.max(1),
            n => n,
        };

        let mut raw = Vec::new();
        let mut pending: Vec<Window<'_>> = Vec::with_capacity(batch.min(total));
        for window in windows {
            pending.push(window);
            if pending.len() == batch {
                self.classify_batch(&pending, &mut raw)?;
                pending.clear();
            }
        }
        if !pending.is_empty() {
            self.classify_batch(&pending, &mut raw)?;
        }

        let set = cluster_detections(&raw, self.scanner.window(), self.hit_threshold);
        let centroids = set.centroids();
        Ok(ScaleDetections {
            windows: total,
            raw,
            clusters: set.into_clusters(),
            centroids,
        })
    }

    fn classify_batch(&self, batch: &[Window<'_>], raw: &mut Vec<Origin>) -> Result<(), DetectError> {
        let patches: Vec<ImageU8<'_>> = batch.iter().map(|w| w.patch).collect();
        let features = self
            .extractor
            .process(&patches)
            .map_err(DetectError::FeatureExtraction)?;
        if features.nrows() != patches.len() {
            return Err(DetectError::FeatureCountMismatch {
                expected: patches.len(),
                got: features.nrows(),
            });
        }
        let labels = self
            .classifier
            .predict(&features)
            .map_err(DetectError::Classification)?;
        if labels.len() != patches.len() {
            return Err(DetectError::LabelCountMismatch {
                expected: patches.len(),
                got: labels.len(),
            });
        }
        for (window, label) in batch.iter().zip(labels) {
            if !label.is_positive() {
                continue;
            }
            raw.push(window.origin);
            if let Some(dump) = self.dump {
                dump.write(self.level_index, window.origin, &window.patch);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Label, LinearClassifier};
    use crate::detector::test_support::{squares_image, MeanIntensity};
    use crate::error::BoxError;
    use crate::features::FeatureMatrix;
    use crate::types::WindowSize;
    use std::error::Error;

    struct Broken;

    impl Classifier for Broken {
        fn train(&mut self, _: &FeatureMatrix, _: &[Label]) -> Result<(), BoxError> {
            Ok(())
        }

        fn predict(&self, _: &FeatureMatrix) -> Result<Vec<Label>, BoxError> {
            Err("model not loaded".into())
        }
    }

    struct Short;

    impl Classifier for Short {
        fn train(&mut self, _: &FeatureMatrix, _: &[Label]) -> Result<(), BoxError> {
            Ok(())
        }

        fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>, BoxError> {
            Ok(vec![Label::Positive; features.nrows().saturating_sub(1)])
        }
    }

    #[test]
    fn bright_square_yields_one_cluster() {
        let data = squares_image(200, 200, &[(60, 60)], 40);
        let img = ImageU8::packed(200, 200, &data);
        let extractor = MeanIntensity(WindowSize::new(40, 40));
        let classifier = LinearClassifier::new(vec![1.0], -0.72);
        let det = SingleScaleDetector::new(&extractor, &classifier, Stride::new(8, 8), 0.6).unwrap();

        let out = det.detect(img).unwrap();
        assert_eq!(out.windows, 21 * 21);
        assert_eq!(
            out.raw,
            vec![
                Origin::new(56, 56),
                Origin::new(64, 56),
                Origin::new(56, 64),
                Origin::new(64, 64)
            ]
        );
        assert_eq!(out.clusters.len(), 1);
        assert_eq!(out.centroids, vec![Origin::new(60, 60)]);
    }

    #[test]
    fn batching_does_not_change_result() {
        let data = squares_image(200, 200, &[(60, 60)], 40);
        let img = ImageU8::packed(200, 200, &data);
        let extractor = MeanIntensity(WindowSize::new(40, 40));
        let classifier = LinearClassifier::new(vec![1.0], -0.72);
        let whole = SingleScaleDetector::new(&extractor, &classifier, Stride::new(8, 8), 0.6)
            .unwrap()
            .detect(img)
            .unwrap();
        let batched = SingleScaleDetector::new(&extractor, &classifier, Stride::new(8, 8), 0.6)
            .unwrap()
            .with_batch_size(7)
            .detect(img)
            .unwrap();
        assert_eq!(whole.raw, batched.raw);
        assert_eq!(whole.centroids, batched.centroids);
    }

    #[test]
    fn blank_image_has_no_detections() {
        let data = vec![0u8; 56 * 56];
        let extractor = MeanIntensity(WindowSize::new(40, 40));
        let classifier = LinearClassifier::new(vec![1.0], -0.72);
        let det = SingleScaleDetector::new(&extractor, &classifier, Stride::new(8, 8), 0.6).unwrap();
        let out = det.detect(ImageU8::packed(56, 56, &data)).unwrap();
        assert_eq!(out.windows, 9);
        assert!(out.raw.is_empty() && out.centroids.is_empty());
    }

    #[test]
    fn classifier_error_is_wrapped_with_source() {
        let data = vec![0u8; 56 * 56];
        let extractor = MeanIntensity(WindowSize::new(40, 40));
        let det = SingleScaleDetector::new(&extractor, &Broken, Stride::new(8, 8), 0.6).unwrap();
        let err = det.detect(ImageU8::packed(56, 56, &data)).unwrap_err();
        assert!(matches!(err, DetectError::Classification(_)));
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("model not loaded"));
    }

    #[test]
    fn short_label_vector_is_reported() {
        let data = vec![0u8; 56 * 56];
        let extractor = MeanIntensity(WindowSize::new(40, 40));
        let det = SingleScaleDetector::new(&extractor, &Short, Stride::new(8, 8), 0.6).unwrap();
        let err = det.detect(ImageU8::packed(56, 56, &data)).unwrap_err();
        assert!(matches!(
            err,
            DetectError::LabelCountMismatch { expected: 9, got: 8 }
        ));
    }

    #[test]
    fn image_smaller_than_window_fails() {
        let data = vec![0u8; 30 * 30];
        let extractor = MeanIntensity(WindowSize::new(40, 40));
        let classifier = LinearClassifier::new(vec![1.0], -0.72);
        let det = SingleScaleDetector::new(&extractor, &classifier, Stride::new(8, 8), 0.6).unwrap();
        let err = det.detect(ImageU8::packed(30, 30, &data)).unwrap_err();
        assert!(matches!(err, DetectError::WindowTooLarge { .. }));
    }
}
