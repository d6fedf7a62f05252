//! Minimal enclosing circle of a planar point set.
//!
//! Incremental Welzl construction: the circle is grown only when a point
//! falls outside it, and each such point is forced onto the boundary of the
//! next candidate. Expected O(n) on shuffled input, O(n³) worst case; the
//! detector feeds it one cluster of window origins at a time, which stays
//! small.
use nalgebra::Point2;
use serde::Serialize;

const CONTAIN_EPS: f64 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point2<f64>,
    pub radius: f64,
}

impl Circle {
    fn point(p: Point2<f64>) -> Self {
        Self {
            center: p,
            radius: 0.0,
        }
    }

    fn from_diameter(a: Point2<f64>, b: Point2<f64>) -> Self {
        let center = nalgebra::center(&a, &b);
        Self {
            center,
            radius: nalgebra::distance(&center, &a),
        }
    }

    /// Circumcircle of three points; falls back to the widest pair when
    /// they are collinear.
    fn from_three(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Self {
        let ab = b - a;
        let ac = c - a;
        let d = 2.0 * (ab.x * ac.y - ab.y * ac.x);
        if d.abs() < 1e-12 {
            let candidates = [
                Self::from_diameter(a, b),
                Self::from_diameter(a, c),
                Self::from_diameter(b, c),
            ];
            return candidates
                .into_iter()
                .fold(Self::point(a), |best, cand| {
                    if cand.radius > best.radius {
                        cand
                    } else {
                        best
                    }
                });
        }
        let ab2 = ab.norm_squared();
        let ac2 = ac.norm_squared();
        let ux = (ac.y * ab2 - ab.y * ac2) / d;
        let uy = (ab.x * ac2 - ac.x * ab2) / d;
        let center = Point2::new(a.x + ux, a.y + uy);
        Self {
            center,
            radius: nalgebra::distance(&center, &a),
        }
    }

    pub fn contains(&self, p: &Point2<f64>) -> bool {
        nalgebra::distance(&self.center, p) <= self.radius + CONTAIN_EPS * (1.0 + self.radius)
    }
}

/// Smallest circle containing every point, or `None` for an empty set.
pub fn min_enclosing_circle(points: &[Point2<f64>]) -> Option<Circle> {
    let (&first, _) = points.split_first()?;
    let mut circle = Circle::point(first);
    for i in 1..points.len() {
        if circle.contains(&points[i]) {
            continue;
        }
        circle = Circle::point(points[i]);
        for j in 0..i {
            if circle.contains(&points[j]) {
                continue;
            }
            circle = Circle::from_diameter(points[i], points[j]);
            for k in 0..j {
                if !circle.contains(&points[k]) {
                    circle = Circle::from_three(points[i], points[j], points[k]);
                }
            }
        }
    }
    Some(circle)
}
