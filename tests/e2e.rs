mod common;

use common::synthetic_image::{
    bright_squares_u8, init_logging, FailingClassifier, MeanIntensity, ModelUnavailable,
};
use std::error::Error;
use window_detector::classifier::LinearClassifier;
use window_detector::error::DetectError;
use window_detector::image::ImageU8;
use window_detector::types::BoundingBox;
use window_detector::{Detector, DetectorParams};

/// Windows covering at least 72% bright pixels are positive.
fn square_detector() -> Detector<MeanIntensity, LinearClassifier> {
    let params = DetectorParams {
        scale_step: 0.7,
        ..DetectorParams::default()
    };
    Detector::new(
        MeanIntensity::new(40, 40),
        LinearClassifier::new(vec![1.0], -0.72),
        params,
    )
    .expect("valid detector parameters")
}

fn center(b: &BoundingBox) -> (f32, f32) {
    let [cx, cy] = b.center();
    (cx, cy)
}

#[test]
fn single_patch_yields_one_centred_box() {
    init_logging();
    let buffer = bright_squares_u8(200, 200, &[(60, 60)], 40);
    let image = ImageU8::packed(200, 200, &buffer);

    let boxes = square_detector().detect_multi_scale(image).unwrap();

    assert_eq!(boxes.len(), 1, "expected exactly one box, got {boxes:?}");
    let (cx, cy) = center(&boxes[0]);
    assert!(
        (cx - 80.0).abs() <= 4.0 && (cy - 80.0).abs() <= 4.0,
        "box centre ({cx}, {cy}) too far from (80, 80)"
    );
    assert_eq!(boxes[0], BoundingBox::new(60, 60, 100, 100));
}

#[test]
fn distant_patches_stay_separate() {
    init_logging();
    let buffer = bright_squares_u8(300, 200, &[(40, 80), (190, 80)], 40);
    let image = ImageU8::packed(300, 200, &buffer);

    let boxes = square_detector().detect_multi_scale(image).unwrap();

    assert_eq!(boxes.len(), 2, "expected two boxes, got {boxes:?}");
    let mut centres: Vec<_> = boxes.iter().map(center).collect();
    centres.sort_by(|a, b| a.0.total_cmp(&b.0));
    for ((cx, cy), (ex, ey)) in centres.into_iter().zip([(60.0, 100.0), (210.0, 100.0)]) {
        assert!(
            (cx - ex).abs() <= 4.0 && (cy - ey).abs() <= 4.0,
            "box centre ({cx}, {cy}) too far from ({ex}, {ey})"
        );
    }
}

#[test]
fn overlapping_patches_merge_into_one_box() {
    init_logging();
    let buffer = bright_squares_u8(200, 200, &[(60, 60), (65, 60)], 40);
    let image = ImageU8::packed(200, 200, &buffer);

    let report = square_detector()
        .detect_multi_scale_with_diagnostics(image)
        .unwrap();

    assert_eq!(report.levels[0].raw_hits, 6);
    assert_eq!(report.levels[0].clusters, 1);
    assert_eq!(report.boxes, vec![BoundingBox::new(64, 60, 104, 100)]);
}

#[test]
fn window_sized_image_has_a_single_level_and_window() {
    init_logging();
    let bright = vec![255u8; 40 * 40];
    let report = square_detector()
        .detect_multi_scale_with_diagnostics(ImageU8::packed(40, 40, &bright))
        .unwrap();

    assert_eq!(report.input.levels, 1);
    assert_eq!(report.levels.len(), 1);
    assert_eq!(report.levels[0].scale, 1.0);
    assert_eq!(report.levels[0].windows, 1);
    assert_eq!(report.boxes, vec![BoundingBox::new(0, 0, 40, 40)]);

    let dark = vec![0u8; 40 * 40];
    let boxes = square_detector()
        .detect_multi_scale(ImageU8::packed(40, 40, &dark))
        .unwrap();
    assert!(boxes.is_empty(), "blank image must give no boxes");
}

#[test]
fn image_smaller_than_window_is_rejected() {
    let buffer = vec![0u8; 39 * 80];
    let err = square_detector()
        .detect_multi_scale(ImageU8::packed(39, 80, &buffer))
        .unwrap_err();
    match err {
        DetectError::WindowTooLarge {
            image_width,
            image_height,
            ..
        } => assert_eq!((image_width, image_height), (39, 80)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn classifier_errors_propagate_unmodified() {
    let detector = Detector::new(
        MeanIntensity::new(40, 40),
        FailingClassifier,
        DetectorParams::default(),
    )
    .expect("valid detector parameters");
    let buffer = bright_squares_u8(100, 100, &[(30, 30)], 40);

    let err = detector
        .detect_multi_scale(ImageU8::packed(100, 100, &buffer))
        .unwrap_err();

    assert!(matches!(err, DetectError::Classification(_)));
    let source = err.source().expect("classifier error kept as source");
    assert!(source.downcast_ref::<ModelUnavailable>().is_some());
}

#[test]
fn report_serialises_to_camel_case_json() {
    let buffer = bright_squares_u8(200, 200, &[(60, 60)], 40);
    let report = square_detector()
        .detect_multi_scale_with_diagnostics(ImageU8::packed(200, 200, &buffer))
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["input"]["scaleStep"], 0.7);
    assert_eq!(json["levels"][0]["rawHits"], 4);
    assert_eq!(json["merge"]["fitApplied"], false);
    assert_eq!(json["boxes"][0]["x1"], 100);
}
