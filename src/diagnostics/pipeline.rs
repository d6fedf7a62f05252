use crate::diagnostics::{LevelReport, MergeStage, TimingBreakdown};
use crate::types::{BoundingBox, WindowSize};
use serde::Serialize;

/// Result produced by
/// [`Detector::detect_multi_scale_with_diagnostics`](crate::Detector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub boxes: Vec<BoundingBox>,
    pub input: InputDescriptor,
    pub levels: Vec<LevelReport>,
    pub merge: MergeStage,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub window: WindowSize,
    pub scale_step: f64,
    pub levels: usize,
}

impl DetectionReport {
    /// Total number of positive windows over all levels.
    pub fn raw_hits(&self) -> usize {
        self.levels.iter().map(|l| l.raw_hits).sum()
    }

    /// Human-readable multi-line summary.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "input {}x{} window {}x{} step {:.3} levels {}\n",
            self.input.width,
            self.input.height,
            self.input.window.w,
            self.input.window.h,
            self.input.scale_step,
            self.input.levels
        );
        for level in &self.levels {
            out.push_str(&format!(
                "  L{:<2} s={:.3} {}x{} windows={} hits={} clusters={} ({:.2} ms)\n",
                level.level_index,
                level.scale,
                level.width,
                level.height,
                level.windows,
                level.raw_hits,
                level.clusters,
                level.elapsed_ms
            ));
        }
        out.push_str(&format!(
            "merge {} -> {}{} | total {:.2} ms\n",
            self.merge.candidates,
            self.merge.merged,
            if self.merge.fit_applied { " (fit)" } else { "" },
            self.timings.total_ms
        ));
        for b in &self.boxes {
            out.push_str(&format!("  box ({}, {}) - ({}, {})\n", b.x0, b.y0, b.x1, b.y1));
        }
        out
    }
}
