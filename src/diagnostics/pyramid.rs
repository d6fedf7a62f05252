use crate::pyramid::ScaleLevel;
use crate::types::BoundingBox;
use serde::Serialize;

/// Statistics for one scale level of a multi-scale run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelReport {
    pub level_index: usize,
    pub scale: f64,
    pub width: usize,
    pub height: usize,
    pub windows: usize,
    pub raw_hits: usize,
    pub clusters: usize,
    /// Cluster representatives mapped back to full resolution.
    pub boxes: Vec<BoundingBox>,
    pub elapsed_ms: f64,
}

impl LevelReport {
    pub fn empty(level: &ScaleLevel) -> Self {
        Self {
            level_index: level.index,
            scale: level.scale,
            width: level.width,
            height: level.height,
            windows: 0,
            raw_hits: 0,
            clusters: 0,
            boxes: Vec::new(),
            elapsed_ms: 0.0,
        }
    }
}
