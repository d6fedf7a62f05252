mod common;

use common::synthetic_image::init_logging;
use window_detector::classifier::{Classifier, Label, LinearClassifier};
use window_detector::features::{FeatureExtractor, HogExtractor, HogParams};
use window_detector::image::ImageU8;
use window_detector::types::WindowSize;
use window_detector::{Detector, DetectorParams};

const SIDE: usize = 16;

/// 16×16 patch split into a dark and a bright half at `split`.
fn edge_patch(vertical: bool, split: usize) -> Vec<u8> {
    let mut data = vec![20u8; SIDE * SIDE];
    for y in 0..SIDE {
        for x in 0..SIDE {
            let bright = if vertical { x >= split } else { y >= split };
            if bright {
                data[y * SIDE + x] = 230;
            }
        }
    }
    data
}

fn hog() -> HogExtractor {
    HogExtractor::new(HogParams::with_window(WindowSize::new(SIDE, SIDE))).unwrap()
}

#[test]
fn perceptron_on_hog_separates_edge_orientations() {
    init_logging();
    let extractor = hog();
    assert_eq!(extractor.feature_len(), 36);

    let mut buffers = Vec::new();
    let mut labels = Vec::new();
    for split in [5usize, 8, 11] {
        buffers.push(edge_patch(true, split));
        labels.push(Label::Positive);
        buffers.push(edge_patch(false, split));
        labels.push(Label::Negative);
    }
    let patches: Vec<ImageU8<'_>> = buffers
        .iter()
        .map(|b| ImageU8::packed(SIDE, SIDE, b))
        .collect();
    let features = extractor.process(&patches).unwrap();
    assert_eq!(features.shape(), (6, 36));

    let mut model = LinearClassifier::zeros(36);
    model.train(&features, &labels).unwrap();
    assert_eq!(model.predict(&features).unwrap(), labels);
}

#[test]
fn hog_detector_runs_over_every_level() {
    init_logging();
    let (w, h) = (48usize, 40usize);
    let mut buffer = vec![20u8; w * h];
    for y in 0..h {
        for x in 24..w {
            buffer[y * w + x] = 230;
        }
    }
    let model = LinearClassifier::new(vec![0.0; 36], 1.0);
    let params = DetectorParams {
        scale_step: 0.8,
        ..DetectorParams::default()
    };
    let detector = Detector::new(hog(), model, params).unwrap();

    let report = detector
        .detect_multi_scale_with_diagnostics(ImageU8::packed(w, h, &buffer))
        .unwrap();

    // t = 16 / 40, ln 0.4 / ln 0.8 = 4.1 -> 5 levels
    assert_eq!(report.levels.len(), 5);
    assert!(report.levels.iter().all(|l| l.windows > 0 && l.raw_hits == l.windows));
    for b in &report.boxes {
        assert!(b.width() > 0 && b.height() > 0, "degenerate box {b:?}");
        assert!(b.x0 >= 0 && b.y0 >= 0 && b.x1 <= w as i32 + 1 && b.y1 <= h as i32 + 1);
    }
    assert!(!report.boxes.is_empty());
}
