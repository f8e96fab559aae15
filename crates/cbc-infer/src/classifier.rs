//! The opaque-classifier capability contract, plus a JSON-loadable linear
//! reference implementation.
//!
//! The trained tree ensemble and neural network are consumed strictly through
//! [`Classifier`]: a fixed input width, a fixed output width, and a
//! `predict` call. Their native serialization formats stay outside this
//! workspace; any runtime that can honor the contract can be plugged in.

use serde::{Deserialize, Serialize};

use crate::error::{InferError, Result};

/// Prediction capability of a loaded model artifact.
///
/// Implementations are read-only after construction and safe to share across
/// threads; the adapter never mutates a model.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Number of feature columns one input row must have.
    fn input_width(&self) -> usize;

    /// Number of scores produced per input row.
    fn output_width(&self) -> usize;

    /// Score one feature row. The returned vector has `output_width()`
    /// entries.
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>>;
}

/// Output activation of a [`LinearModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activation {
    #[default]
    Identity,
    Sigmoid,
}

/// A dense linear scorer: one weight row and bias per output, optional
/// sigmoid, optional 0.5 binarization.
///
/// This is the reference implementation of the classifier contract. It backs
/// the test suite and the demo artifacts; a tree-ensemble or neural runtime
/// replaces it in production by implementing [`Classifier`] directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// One row of per-feature weights per output.
    pub weights: Vec<Vec<f64>>,
    /// One bias per output.
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
    /// When set, scores are thresholded at 0.5 into 0/1 before returning,
    /// the way the tree ensemble emits hard labels.
    #[serde(default)]
    pub binarize: bool,
}

impl LinearModel {
    /// Validate internal shape: rectangular weights, one bias per output.
    pub fn validate(&self, name: &'static str) -> Result<()> {
        let width = self.weights.first().map_or(0, Vec::len);
        if self.weights.iter().any(|row| row.len() != width) {
            return Err(InferError::MalformedModel {
                model: name,
                detail: "weight rows have differing lengths".to_string(),
            });
        }
        if self.bias.len() != self.weights.len() {
            return Err(InferError::MalformedModel {
                model: name,
                detail: format!(
                    "{} weight rows but {} bias terms",
                    self.weights.len(),
                    self.bias.len()
                ),
            });
        }
        Ok(())
    }
}

impl Classifier for LinearModel {
    fn input_width(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn output_width(&self) -> usize {
        self.weights.len()
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<f64>> {
        let mut scores = Vec::with_capacity(self.weights.len());
        for (row, bias) in self.weights.iter().zip(&self.bias) {
            let mut score: f64 = row
                .iter()
                .zip(features)
                .map(|(weight, value)| weight * value)
                .sum::<f64>()
                + bias;
            if self.activation == Activation::Sigmoid {
                score = 1.0 / (1.0 + (-score).exp());
            }
            if self.binarize {
                score = if score > 0.5 { 1.0 } else { 0.0 };
            }
            scores.push(score);
        }
        Ok(scores)
    }
}
