use crate::detector::DetectorParams;
use crate::features::HogParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Diagnostics report as JSON.
    pub json_out: Option<PathBuf>,
    /// Copy of the input with every detection outlined.
    pub annotated_image: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    /// Serialized [`LinearClassifier`](crate::classifier::LinearClassifier).
    pub model_path: PathBuf,
    #[serde(default)]
    pub hog: HogParams,
    #[serde(default)]
    pub params: DetectorParams,
    #[serde(default)]
    pub output: OutputConfig,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(contents)
}
