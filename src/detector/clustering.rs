//! Greedy grouping of positive windows within one scale level.
//!
//! Windows are visited in scan order. A window joins the first cluster (in
//! creation order) whose members *all* overlap it by at least
//! `1 - hit_threshold`; otherwise it opens a new cluster. This
//! all-must-be-close linkage is single pass and order dependent: feeding the
//! same origins in another order can produce different clusters.
//!
//! Clusters live in an index-stable arena and every inserted window records
//! the index of the cluster it joined, so membership can be inspected after
//! the fact.
use crate::geometry::min_enclosing_circle;
use crate::types::{round_half_up, Origin, WindowSize};
use log::trace;
use nalgebra::Point2;
use serde::Serialize;

/// Fraction of the window footprint shared by two equally sized windows at
/// origins `a` and `b`, in `[0, 1]`.
pub fn window_overlap(a: Origin, b: Origin, window: WindowSize) -> f64 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    if dx >= window.w || dy >= window.h {
        return 0.0;
    }
    let area = (window.w - dx) * (window.h - dy);
    area as f64 / window.area() as f64
}

/// Non-empty group of window origins from one scale level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cluster {
    members: Vec<Origin>,
}

impl Cluster {
    fn new(first: Origin) -> Self {
        Self {
            members: vec![first],
        }
    }

    pub fn members(&self) -> &[Origin] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `p` overlaps every member by at least `min_overlap`.
    pub fn accepts(&self, p: Origin, window: WindowSize, min_overlap: f64) -> bool {
        self.members
            .iter()
            .all(|&m| window_overlap(m, p, window) >= min_overlap)
    }

    /// Representative origin: centre of the minimal enclosing circle of the
    /// members, rounded to the nearest pixel.
    pub fn centroid(&self) -> Origin {
        let points: Vec<Point2<f64>> = self
            .members
            .iter()
            .map(|m| Point2::new(m.x as f64, m.y as f64))
            .collect();
        match min_enclosing_circle(&points) {
            Some(circle) => Origin::new(
                round_half_up(circle.center.x).max(0) as usize,
                round_half_up(circle.center.y).max(0) as usize,
            ),
            None => self.members[0],
        }
    }
}

/// Ordered arena of clusters plus the cluster index of every insertion.
#[derive(Clone, Debug)]
pub struct ClusterSet {
    window: WindowSize,
    min_overlap: f64,
    clusters: Vec<Cluster>,
    membership: Vec<usize>,
}

impl ClusterSet {
    pub fn new(window: WindowSize, hit_threshold: f64) -> Self {
        Self {
            window,
            min_overlap: 1.0 - hit_threshold,
            clusters: Vec::new(),
            membership: Vec::new(),
        }
    }

    /// Add one positive window; returns the index of the cluster it joined.
    pub fn insert(&mut self, p: Origin) -> usize {
        let joined = self
            .clusters
            .iter()
            .position(|c| c.accepts(p, self.window, self.min_overlap));
        let idx = match joined {
            Some(idx) => {
                self.clusters[idx].members.push(p);
                idx
            }
            None => {
                self.clusters.push(Cluster::new(p));
                trace!(
                    "cluster #{} opened at ({}, {})",
                    self.clusters.len() - 1,
                    p.x,
                    p.y
                );
                self.clusters.len() - 1
            }
        };
        self.membership.push(idx);
        idx
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster index of the i-th inserted window.
    pub fn membership(&self) -> &[usize] {
        &self.membership
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// One representative origin per cluster, in creation order.
    pub fn centroids(&self) -> Vec<Origin> {
        self.clusters.iter().map(Cluster::centroid).collect()
    }

    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }
}

/// Cluster `points` (in the given order) with the greedy linkage rule.
pub fn cluster_detections(points: &[Origin], window: WindowSize, hit_threshold: f64) -> ClusterSet {
    let mut set = ClusterSet::new(window, hit_threshold);
    for &p in points {
        set.insert(p);
    }
    set
}
