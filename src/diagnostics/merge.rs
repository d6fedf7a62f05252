use serde::Serialize;

/// Cross-scale merge and shrink outcome.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStage {
    /// Boxes entering the merge, summed over all levels.
    pub candidates: usize,
    pub merged: usize,
    pub fit_applied: bool,
    pub elapsed_ms: f64,
}
