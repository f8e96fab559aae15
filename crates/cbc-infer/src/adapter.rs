//! The inference adapter: feature vectors through both classifiers onto the
//! six named condition flags.

use tracing::debug;

use cbc_model::{PatientRecord, PredictionResult};
use cbc_transform::{FeatureVector, assemble, coerce_batch, evaluate};
use cbc_transform::coerce::{RawPanel, RowError};

use crate::artifacts::{
    ArtifactSet, NEURAL_LABEL_INDEX, NEURAL_MODEL_NAME, TREE_LABEL_COUNT, TREE_MODEL_NAME,
};
use crate::error::{InferError, Result};

/// Screening outcome for one batch row: the prediction, or the coercion
/// error that kept the row out of the pipeline.
#[derive(Debug)]
pub struct BatchPrediction {
    /// Zero-based index into the input batch.
    pub row: usize,
    pub outcome: std::result::Result<PredictionResult, RowError>,
}

impl ArtifactSet {
    /// Run the assembled feature vector through both classifiers.
    ///
    /// The tree ensemble supplies the first five labels as hard 0/1 outputs;
    /// the neural network supplies a probability for the sixth, thresholded
    /// at 0.5.
    pub fn infer(&self, features: &FeatureVector) -> Result<PredictionResult> {
        let tree_scores = self.tree().predict(features.values())?;
        if tree_scores.len() < TREE_LABEL_COUNT {
            return Err(InferError::BadPrediction {
                model: TREE_MODEL_NAME,
                expected: TREE_LABEL_COUNT,
                actual: tree_scores.len(),
            });
        }
        let neural_scores = self.neural().predict(features.values())?;
        if neural_scores.len() <= NEURAL_LABEL_INDEX {
            return Err(InferError::BadPrediction {
                model: NEURAL_MODEL_NAME,
                expected: NEURAL_LABEL_INDEX + 1,
                actual: neural_scores.len(),
            });
        }
        let hard = |score: f64| u8::from(score != 0.0);
        Ok(PredictionResult {
            is_anemia: hard(tree_scores[0]),
            is_thalassemia_suspected: hard(tree_scores[1]),
            is_microcytic_rbc: hard(tree_scores[2]),
            is_infection_inflammation: hard(tree_scores[3]),
            is_allergy_parasite: hard(tree_scores[4]),
            is_high_lipids: u8::from(neural_scores[NEURAL_LABEL_INDEX] > 0.5),
        })
    }

    /// Screen one record end to end: rules, encoding, assembly, inference.
    pub fn screen(&self, record: &PatientRecord) -> Result<PredictionResult> {
        let labels = evaluate(record);
        debug!(%labels, "evaluated status rules");
        let features = assemble(record, &labels, self.schema(), self.scaler())?;
        self.infer(&features)
    }

    /// Screen a batch of raw panels.
    ///
    /// Coercion (including the batch-wide median fill) runs once over the
    /// whole batch; each coerced record is then screened independently. Rows
    /// rejected during coercion come back as per-row errors in input order.
    pub fn screen_batch(&self, panels: &[RawPanel]) -> Result<Vec<BatchPrediction>> {
        let batch = coerce_batch(panels)?;
        let mut outcomes = Vec::with_capacity(panels.len());
        for coerced in batch.records {
            let prediction = self.screen(&coerced.record)?;
            outcomes.push(BatchPrediction {
                row: coerced.row,
                outcome: Ok(prediction),
            });
        }
        for error in batch.errors {
            outcomes.push(BatchPrediction {
                row: error.row,
                outcome: Err(error),
            });
        }
        outcomes.sort_by_key(|entry| entry.row);
        Ok(outcomes)
    }
}
