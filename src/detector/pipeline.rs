//! Multi-scale detector driving pyramid, scanner, clustering and merge.
//!
//! The [`Detector`] owns a feature extractor, a classifier and a
//! [`DetectorParams`]. `detect_multi_scale` walks the scale pyramid (finest
//! first), runs a [`SingleScaleDetector`] on each resized image, maps every
//! cluster representative back to a full-resolution box and merges the boxes
//! across scales.
//!
//! Typical usage:
//! ```no_run
//! use window_detector::{Detector, DetectorParams, HogExtractor, HogParams, LinearClassifier};
//! use window_detector::image::ImageU8;
//!
//! # fn example(gray: ImageU8, model: LinearClassifier) -> Result<(), Box<dyn std::error::Error>> {
//! let hog = HogExtractor::new(HogParams::default())?;
//! let detector = Detector::new(hog, model, DetectorParams::default())?;
//! for b in detector.detect_multi_scale(gray)? {
//!     println!("({}, {}) - ({}, {})", b.x0, b.y0, b.x1, b.y1);
//! }
//! # Ok(())
//! # }
//! ```
use super::dump::PatchDump;
use super::merge::{merge_boxes, shrink_box};
use super::params::DetectorParams;
use super::single::{ScaleDetections, SingleScaleDetector};
use crate::classifier::Classifier;
use crate::diagnostics::{
    DetectionReport, InputDescriptor, LevelReport, MergeStage, TimingBreakdown,
};
use crate::error::DetectError;
use crate::features::FeatureExtractor;
use crate::image::{resize_u8, ImageU8};
use crate::pyramid::{ScaleLevel, ScalePyramid};
use crate::types::{BoundingBox, Origin, WindowSize};
use log::debug;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sliding-window object detector over a geometric scale pyramid.
pub struct Detector<F, C> {
    extractor: F,
    classifier: C,
    params: DetectorParams,
    dump: Option<PatchDump>,
}

impl<F, C> Detector<F, C>
where
    F: FeatureExtractor,
    C: Classifier,
{
    /// Build a detector; the window geometry is taken from `extractor`.
    pub fn new(extractor: F, classifier: C, params: DetectorParams) -> Result<Self, DetectError> {
        params.validate()?;
        if extractor.window_size().is_empty() {
            return Err(DetectError::EmptyWindow);
        }
        let dump = params.debug_dir.as_ref().map(PatchDump::new);
        Ok(Self {
            extractor,
            classifier,
            params,
            dump,
        })
    }

    pub fn window_size(&self) -> WindowSize {
        self.extractor.window_size()
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    pub fn extractor(&self) -> &F {
        &self.extractor
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Mutable access for (re)training the classifier in place.
    pub fn classifier_mut(&mut self) -> &mut C {
        &mut self.classifier
    }

    /// Single-scale detection on `image` as given; returns one origin per
    /// cluster of positive windows.
    pub fn detect(&self, image: ImageU8<'_>) -> Result<Vec<Origin>, DetectError> {
        Ok(self.detect_level(image, 0)?.centroids)
    }

    /// Multi-scale detection; boxes are in `image` coordinates.
    pub fn detect_multi_scale(&self, image: ImageU8<'_>) -> Result<Vec<BoundingBox>, DetectError> {
        Ok(self.detect_multi_scale_with_diagnostics(image)?.boxes)
    }

    /// Multi-scale detection together with a per-level report.
    pub fn detect_multi_scale_with_diagnostics(
        &self,
        image: ImageU8<'_>,
    ) -> Result<DetectionReport, DetectError> {
        let total_start = Instant::now();
        let window = self.window_size();
        let mut pyramid = ScalePyramid::generate(image.w, image.h, window, self.params.scale_step)?;
        if let Some(max_levels) = self.params.max_levels {
            pyramid = pyramid.truncated(max_levels);
        }
        debug!(
            "Detector::detect_multi_scale start w={} h={} window={}x{} levels={}",
            image.w,
            image.h,
            window.w,
            window.h,
            pyramid.len()
        );

        let levels = self.run_levels(image, &pyramid)?;

        let merge_start = Instant::now();
        let per_level: Vec<&[BoundingBox]> = levels.iter().map(|l| l.boxes.as_slice()).collect();
        let candidates = per_level.iter().map(|b| b.len()).sum();
        let quirks = self.params.quirks;
        let mut boxes = merge_boxes(&per_level, self.params.group_threshold, quirks);
        if self.params.fit {
            for b in boxes.iter_mut() {
                *b = shrink_box(b, self.params.shrink, quirks);
            }
        }
        let merge_ms = merge_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "Detector::detect_multi_scale merged {} candidates into {} boxes (fit={})",
            candidates,
            boxes.len(),
            self.params.fit
        );

        let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        let mut timings = TimingBreakdown::with_total(total_ms);
        for level in &levels {
            timings.push(format!("level {}", level.level_index), level.elapsed_ms);
        }
        timings.push("merge", merge_ms);

        Ok(DetectionReport {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
                window,
                scale_step: self.params.scale_step,
                levels: pyramid.len(),
            },
            merge: MergeStage {
                candidates,
                merged: boxes.len(),
                fit_applied: self.params.fit,
                elapsed_ms: merge_ms,
            },
            boxes,
            levels,
            timings,
        })
    }

    fn detect_level(
        &self,
        image: ImageU8<'_>,
        level_index: usize,
    ) -> Result<ScaleDetections, DetectError> {
        SingleScaleDetector::new(
            &self.extractor,
            &self.classifier,
            self.params.stride,
            self.params.hit_threshold,
        )?
        .with_batch_size(self.params.batch_size)
        .with_dump(self.dump.as_ref(), level_index)
        .detect(image)
    }

    fn run_levels(
        &self,
        image: ImageU8<'_>,
        pyramid: &ScalePyramid,
    ) -> Result<Vec<LevelReport>, DetectError> {
        #[cfg(feature = "parallel")]
        {
            pyramid
                .levels()
                .par_iter()
                .map(|level| self.run_level(image, level))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            pyramid
                .iter()
                .map(|level| self.run_level(image, level))
                .collect()
        }
    }

    fn run_level(&self, image: ImageU8<'_>, level: &ScaleLevel) -> Result<LevelReport, DetectError> {
        let start = Instant::now();
        let resized;
        let view = if level.width == image.w && level.height == image.h {
            image
        } else {
            resized = resize_u8(&image, level.width, level.height);
            resized.as_view()
        };

        let detections = self.detect_level(view, level.index)?;
        let window = self.window_size();
        let scaling = level.scaling();
        let boxes: Vec<BoundingBox> = detections
            .centroids
            .iter()
            .map(|&c| scaling.window_to_full(c, window))
            .collect();

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "level {} s={:.3} {}x{} windows={} hits={} clusters={} ({:.2} ms)",
            level.index,
            level.scale,
            level.width,
            level.height,
            detections.windows,
            detections.raw.len(),
            detections.clusters.len(),
            elapsed_ms
        );
        Ok(LevelReport {
            windows: detections.windows,
            raw_hits: detections.raw.len(),
            clusters: detections.clusters.len(),
            boxes,
            elapsed_ms,
            ..LevelReport::empty(level)
        })
    }
}
