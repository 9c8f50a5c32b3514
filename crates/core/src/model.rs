//! Scoring model artifact.
//!
//! The pipeline consumes a trained multi-label network; it never trains one.
//! The artifact is loaded once at startup, shape-checked, and shared
//! immutably across requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactError;

/// A function from normalized feature vector to one relevance score per
/// catalog item, in catalog load order. Scores are nominally sigmoid output
/// in [0, 1] but callers only rely on "larger means more relevant".
pub trait ScoringModel: Send + Sync {
    fn input_width(&self) -> usize;
    fn output_width(&self) -> usize;
    fn predict(&self, input: &[f64]) -> Vec<f64>;
}

/// Single-hidden-layer network: ReLU hidden layer, sigmoid output layer.
/// Weight rows are per-unit: `hidden_weights[j]` spans the input vector,
/// `output_weights[i]` spans the hidden layer and scores catalog item `i`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MlpModel {
    pub version: String,
    pub trained_at: DateTime<Utc>,
    /// Catalog product names at training time, kept for interpretability.
    pub labels: Vec<String>,
    pub hidden_weights: Vec<Vec<f64>>,
    pub hidden_bias: Vec<f64>,
    pub output_weights: Vec<Vec<f64>>,
    pub output_bias: Vec<f64>,
}

impl MlpModel {
    /// Shape consistency checks, run once at load.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let input_width = self.hidden_weights.first().map(Vec::len).unwrap_or(0);
        if input_width == 0 {
            return Err(ArtifactError::Validation(format!(
                "model `{}` has an empty hidden layer",
                self.version
            )));
        }
        if self.hidden_weights.iter().any(|row| row.len() != input_width) {
            return Err(ArtifactError::Validation(format!(
                "model `{}` has ragged hidden weight rows",
                self.version
            )));
        }
        if self.hidden_bias.len() != self.hidden_weights.len() {
            return Err(ArtifactError::Validation(format!(
                "model `{}` hidden bias covers {} units but the layer has {}",
                self.version,
                self.hidden_bias.len(),
                self.hidden_weights.len()
            )));
        }
        let hidden_width = self.hidden_weights.len();
        if self.output_weights.is_empty()
            || self.output_weights.iter().any(|row| row.len() != hidden_width)
        {
            return Err(ArtifactError::Validation(format!(
                "model `{}` output layer does not span the hidden layer",
                self.version
            )));
        }
        if self.output_bias.len() != self.output_weights.len()
            || self.labels.len() != self.output_weights.len()
        {
            return Err(ArtifactError::Validation(format!(
                "model `{}` output bias/labels do not cover all {} outputs",
                self.version,
                self.output_weights.len()
            )));
        }
        Ok(())
    }

    fn sigmoid(z: f64) -> f64 {
        let z = z.clamp(-500.0, 500.0);
        1.0 / (1.0 + (-z).exp())
    }
}

impl ScoringModel for MlpModel {
    fn input_width(&self) -> usize {
        self.hidden_weights.first().map(Vec::len).unwrap_or(0)
    }

    fn output_width(&self) -> usize {
        self.output_weights.len()
    }

    fn predict(&self, input: &[f64]) -> Vec<f64> {
        let hidden: Vec<f64> = self
            .hidden_weights
            .iter()
            .zip(&self.hidden_bias)
            .map(|(row, bias)| {
                let z: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + bias;
                z.max(0.0)
            })
            .collect();

        self.output_weights
            .iter()
            .zip(&self.output_bias)
            .map(|(row, bias)| {
                let z: f64 = row.iter().zip(&hidden).map(|(w, h)| w * h).sum::<f64>() + bias;
                Self::sigmoid(z)
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Identity-ish model: `outputs` rows select hidden units one-to-one.
    pub(crate) fn passthrough_model(input_width: usize, output_width: usize) -> MlpModel {
        let hidden_weights: Vec<Vec<f64>> = (0..input_width)
            .map(|i| (0..input_width).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        let output_weights: Vec<Vec<f64>> = (0..output_width)
            .map(|i| (0..input_width).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        MlpModel {
            version: "test".to_string(),
            trained_at: Utc::now(),
            labels: (0..output_width).map(|i| format!("product-{i}")).collect(),
            hidden_weights,
            hidden_bias: vec![0.0; input_width],
            output_weights,
            output_bias: vec![0.0; output_width],
        }
    }

    #[test]
    fn sigmoid_is_bounded() {
        assert!((MlpModel::sigmoid(0.0) - 0.5).abs() < 1e-9);
        assert!(MlpModel::sigmoid(1e6) <= 1.0);
        assert!(MlpModel::sigmoid(-1e6) >= 0.0);
    }

    #[test]
    fn predict_emits_one_score_per_output_row() {
        let model = passthrough_model(4, 3);
        let scores = model.predict(&[0.5, 0.25, 0.0, 1.0]);
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|score| (0.0..=1.0).contains(score)));
        // Larger input on unit 0 than unit 1 must keep the score ordering.
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn ragged_hidden_rows_fail_validation() {
        let mut model = passthrough_model(4, 2);
        model.hidden_weights[1].pop();
        assert!(model.validate().is_err());
    }

    #[test]
    fn bias_width_mismatch_fails_validation() {
        let mut model = passthrough_model(4, 2);
        model.output_bias.push(0.0);
        assert!(model.validate().is_err());
    }

    #[test]
    fn valid_shapes_pass_validation() {
        let model = passthrough_model(19, 5);
        assert!(model.validate().is_ok());
        assert_eq!(model.input_width(), 19);
        assert_eq!(model.output_width(), 5);
    }
}
