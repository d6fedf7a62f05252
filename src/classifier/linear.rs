//! Linear decision function `w·x + b ≥ 0`.
//!
//! Weights are usually produced offline (e.g. by a linear SVM) and loaded
//! from JSON. `train` fits an averaged perceptron, which is enough for
//! separable toy problems and for smoke-testing a pipeline end to end.
use super::{Classifier, Label};
use crate::error::BoxError;
use crate::features::FeatureMatrix;
use log::info;
use nalgebra::{DVector, DVectorView};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptronParams {
    pub epochs: usize,
    pub learning_rate: f32,
}

impl Default for PerceptronParams {
    fn default() -> Self {
        Self {
            epochs: 20,
            learning_rate: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub weights: Vec<f32>,
    pub bias: f32,
    #[serde(default)]
    pub training: PerceptronParams,
}

impl LinearClassifier {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self {
            weights,
            bias,
            training: PerceptronParams::default(),
        }
    }

    /// Untrained model for `dim`-dimensional features.
    pub fn zeros(dim: usize) -> Self {
        Self::new(vec![0.0; dim], 0.0)
    }

    pub fn with_training(mut self, training: PerceptronParams) -> Self {
        self.training = training;
        self
    }

    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// Signed score per row; positive side of the hyperplane is `>= 0`.
    pub fn decision_function(&self, features: &FeatureMatrix) -> Result<DVector<f32>, BoxError> {
        if features.ncols() != self.weights.len() {
            return Err(format!(
                "model expects {} features, got {}",
                self.weights.len(),
                features.ncols()
            )
            .into());
        }
        let w = DVectorView::from_slice(&self.weights, self.weights.len());
        Ok((features * w).add_scalar(self.bias))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        info!("loading \"{}\" ...", path.display());
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read model {}: {e}", path.display()))?;
        let model: Self = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse model {}: {e}", path.display()))?;
        info!("\"{}\" loaded ({} weights)", path.display(), model.dim());
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        crate::image::io::write_json_file(path, self)?;
        info!("\"{}\" saved", path.display());
        Ok(())
    }
}

impl Classifier for LinearClassifier {
    fn train(&mut self, features: &FeatureMatrix, labels: &[Label]) -> Result<(), BoxError> {
        let (n, dim) = features.shape();
        if n != labels.len() {
            return Err(format!("{n} samples but {} labels", labels.len()).into());
        }
        if n == 0 {
            return Err("cannot train on an empty sample set".into());
        }
        let lr = self.training.learning_rate;
        let mut w = DVector::<f32>::zeros(dim);
        let mut b = 0.0f32;
        let mut w_sum = DVector::<f32>::zeros(dim);
        let mut b_sum = 0.0f32;
        let mut steps = 0usize;

        for _ in 0..self.training.epochs.max(1) {
            for (i, label) in labels.iter().enumerate() {
                let x = features.row(i).transpose();
                let y = label.sign();
                if y * (w.dot(&x) + b) <= 0.0 {
                    w.axpy(lr * y, &x, 1.0);
                    b += lr * y;
                }
                w_sum += &w;
                b_sum += b;
                steps += 1;
            }
        }

        let inv = 1.0 / steps as f32;
        self.weights = (w_sum * inv).iter().copied().collect();
        self.bias = b_sum * inv;
        Ok(())
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>, BoxError> {
        let scores = self.decision_function(features)?;
        Ok(scores.iter().map(|&s| Label::from(s >= 0.0)).collect())
    }
}
