//! Cross-scale merge and the optional shrink pass.
//!
//! Boxes from every level are visited in level order (finest first). Each
//! candidate is compared against the running list of survivors; the first
//! survivor it overlaps by at least `group_threshold` (intersection over the
//! smaller area) is replaced by the coordinate-wise average of the two,
//! otherwise the candidate is appended. The average is integer division
//! rounded towards negative infinity.
pub use super::params::Quirks;
use crate::types::{round_half_up, BoundingBox, ShrinkFactors};

/// Intersection area over the area of the smaller box, in `[0, 1]`.
///
/// Returns 0 when either box is degenerate.
pub fn overlap_area(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let small = a.area().min(b.area());
    if small <= 0 {
        return 0.0;
    }
    let iw = a.x1.min(b.x1) - a.x0.max(b.x0);
    let ih = a.y1.min(b.y1) - a.y0.max(b.y0);
    if iw < 0 || ih < 0 {
        return 0.0;
    }
    (iw as i64 * ih as i64) as f64 / small as f64
}

/// Historical overlap: the joint extent takes `max` of the end corners on x
/// but `min` on y, so the vertical overlap collapses to
/// `max(y1) - max(y0)`.
pub fn legacy_overlap_area(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let small = a.area().min(b.area());
    if small <= 0 {
        return 0.0;
    }
    let start = (a.x0.min(b.x0), a.y0.min(b.y0));
    let end = (a.x1.max(b.x1), a.y1.min(b.y1));
    let lap_x = a.width() + b.width() - (end.0 - start.0);
    let lap_y = a.height() + b.height() - (end.1 - start.1);
    if lap_x < 0 || lap_y < 0 {
        return 0.0;
    }
    (lap_x as i64 * lap_y as i64) as f64 / small as f64
}

pub fn box_overlap(a: &BoundingBox, b: &BoundingBox, quirks: Quirks) -> f64 {
    match quirks {
        Quirks::Corrected => overlap_area(a, b),
        Quirks::Legacy => legacy_overlap_area(a, b),
    }
}

/// Coordinate-wise average of two boxes.
pub fn average_boxes(a: &BoundingBox, b: &BoundingBox) -> BoundingBox {
    BoundingBox {
        x0: (a.x0 + b.x0).div_euclid(2),
        y0: (a.y0 + b.y0).div_euclid(2),
        x1: (a.x1 + b.x1).div_euclid(2),
        y1: (a.y1 + b.y1).div_euclid(2),
    }
}

/// Merge per-level box lists into the final detections.
pub fn merge_boxes<L>(levels: &[L], group_threshold: f64, quirks: Quirks) -> Vec<BoundingBox>
where
    L: AsRef<[BoundingBox]>,
{
    let mut founds: Vec<BoundingBox> = Vec::new();
    for candidate in levels.iter().flat_map(|l| l.as_ref().iter()) {
        let hit = founds
            .iter()
            .position(|f| box_overlap(candidate, f, quirks) >= group_threshold);
        match hit {
            Some(i) => founds[i] = average_boxes(candidate, &founds[i]),
            None => founds.push(*candidate),
        }
    }
    founds
}

/// Shrink a box towards its centre, keeping `factors` of each side.
pub fn shrink_box(b: &BoundingBox, factors: ShrinkFactors, quirks: Quirks) -> BoundingBox {
    let dx = round_half_up(b.width() as f64 * (1.0 - factors.fx) / 2.0);
    let dy = round_half_up(b.height() as f64 * (1.0 - factors.fy) / 2.0);
    let top = match quirks {
        Quirks::Corrected => dy,
        Quirks::Legacy => dx,
    };
    BoundingBox {
        x0: b.x0 + dx,
        y0: b.y0 + top,
        x1: b.x1 - dx,
        y1: b.y1 - dy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_uses_smaller_area() {
        let big = BoundingBox::new(0, 0, 100, 100);
        let inner = BoundingBox::new(10, 10, 50, 50);
        assert_eq!(overlap_area(&big, &inner), 1.0);
        assert_eq!(overlap_area(&inner, &big), 1.0);

        let a = BoundingBox::new(0, 0, 40, 40);
        let b = BoundingBox::new(20, 0, 60, 40);
        assert!((overlap_area(&a, &b) - 0.5).abs() < 1e-12);
        assert_eq!(overlap_area(&a, &BoundingBox::new(50, 50, 90, 90)), 0.0);
    }

    #[test]
    fn degenerate_boxes_never_overlap() {
        let a = BoundingBox::new(0, 0, 40, 40);
        let flat = BoundingBox::new(10, 10, 30, 10);
        assert_eq!(overlap_area(&a, &flat), 0.0);
        assert_eq!(legacy_overlap_area(&a, &flat), 0.0);
    }

    #[test]
    fn legacy_overlap_differs_on_vertical_offsets() {
        let a = BoundingBox::new(0, 0, 40, 40);
        let b = BoundingBox::new(0, 20, 40, 60);
        assert!((overlap_area(&a, &b) - 0.5).abs() < 1e-12);
        // 40 + 40 - (40 - 0) on y: full height counted as shared.
        assert_eq!(legacy_overlap_area(&a, &b), 1.0);
        // Horizontal offsets agree.
        let c = BoundingBox::new(20, 0, 60, 40);
        assert_eq!(legacy_overlap_area(&a, &c), overlap_area(&a, &c));
    }

    #[test]
    fn average_floors_towards_negative_infinity() {
        let a = BoundingBox::new(0, 1, 41, 40);
        let b = BoundingBox::new(3, 4, 44, 43);
        assert_eq!(average_boxes(&a, &b), BoundingBox::new(1, 2, 42, 41));
        let n = BoundingBox::new(-3, 0, 10, 10);
        let m = BoundingBox::new(0, 0, 10, 10);
        assert_eq!(average_boxes(&n, &m).x0, -2);
    }

    #[test]
    fn overlapping_boxes_merge_into_first_survivor() {
        let levels = vec![
            vec![BoundingBox::new(60, 60, 100, 100), BoundingBox::new(200, 60, 240, 100)],
            vec![BoundingBox::new(58, 58, 102, 102)],
        ];
        let merged = merge_boxes(&levels, 0.72, Quirks::Corrected);
        assert_eq!(
            merged,
            vec![BoundingBox::new(59, 59, 101, 101), BoundingBox::new(200, 60, 240, 100)]
        );
    }

    #[test]
    fn weak_overlap_keeps_boxes_apart() {
        let levels = [[BoundingBox::new(0, 0, 40, 40)], [BoundingBox::new(20, 0, 60, 40)]];
        let merged = merge_boxes(&levels, 0.72, Quirks::Corrected);
        assert_eq!(merged.len(), 2);
        assert!(merge_boxes::<Vec<BoundingBox>>(&[], 0.72, Quirks::Corrected).is_empty());
    }

    #[test]
    fn shrink_keeps_requested_fraction() {
        let b = BoundingBox::new(0, 0, 100, 200);
        let factors = ShrinkFactors { fx: 0.75, fy: 0.85 };
        // dx = round(12.5) = 13, dy = round(15) = 15
        assert_eq!(
            shrink_box(&b, factors, Quirks::Corrected),
            BoundingBox::new(13, 15, 87, 185)
        );
        assert_eq!(
            shrink_box(&b, factors, Quirks::Legacy),
            BoundingBox::new(13, 13, 87, 185)
        );
    }

    #[test]
    fn unit_factors_leave_box_unchanged() {
        let b = BoundingBox::new(5, 7, 45, 47);
        let factors = ShrinkFactors { fx: 1.0, fy: 1.0 };
        assert_eq!(shrink_box(&b, factors, Quirks::Corrected), b);
    }
}
