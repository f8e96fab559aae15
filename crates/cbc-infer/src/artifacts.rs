//! Startup-time artifact loading and shape validation.
//!
//! Four artifacts are required to serve: the expected-column schema, the
//! fitted scaler, the tree-ensemble classifier, and the neural classifier.
//! They are loaded once, validated against each other, and held immutably
//! for the process lifetime — an explicit context object passed by
//! reference, not ambient global state. Any mismatch is fatal here, before
//! the first record, never surfaced as a per-request error.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use cbc_transform::{ColumnSchema, Scaler};

use crate::classifier::{Classifier, LinearModel};
use crate::error::{InferError, Result};

/// Artifact file names as exported by the training pipeline.
pub mod file {
    pub const MODEL_COLUMNS: &str = "model_columns.json";
    pub const SCALER: &str = "scaler.json";
    pub const TREE_MODEL: &str = "tree_model.json";
    pub const NEURAL_MODEL: &str = "neural_model.json";
}

pub(crate) const TREE_MODEL_NAME: &str = "tree ensemble";
pub(crate) const NEURAL_MODEL_NAME: &str = "neural network";

/// Outputs consumed from the tree ensemble (labels 1-5).
pub(crate) const TREE_LABEL_COUNT: usize = 5;

/// Output index consumed from the neural network (label 6).
pub(crate) const NEURAL_LABEL_INDEX: usize = 5;

/// The immutable serving context: schema, scaler, and both classifiers.
///
/// Read-only after construction and safe for unlimited concurrent readers.
#[derive(Debug)]
pub struct ArtifactSet {
    schema: ColumnSchema,
    scaler: Scaler,
    tree: Box<dyn Classifier>,
    neural: Box<dyn Classifier>,
}

impl ArtifactSet {
    /// Assemble a context from already-loaded artifacts, validating every
    /// cross-artifact shape constraint.
    pub fn new(
        schema: ColumnSchema,
        scaler: Scaler,
        tree: Box<dyn Classifier>,
        neural: Box<dyn Classifier>,
    ) -> Result<Self> {
        for column in schema.numeric_columns() {
            if !scaler.has_column(column) {
                return Err(InferError::ScalerSchemaMismatch {
                    column: column.to_string(),
                });
            }
        }
        check_input_width(TREE_MODEL_NAME, tree.as_ref(), schema.len())?;
        check_input_width(NEURAL_MODEL_NAME, neural.as_ref(), schema.len())?;
        if tree.output_width() < TREE_LABEL_COUNT {
            return Err(InferError::OutputWidthMismatch {
                model: TREE_MODEL_NAME,
                required: TREE_LABEL_COUNT,
                actual: tree.output_width(),
            });
        }
        if neural.output_width() <= NEURAL_LABEL_INDEX {
            return Err(InferError::OutputWidthMismatch {
                model: NEURAL_MODEL_NAME,
                required: NEURAL_LABEL_INDEX + 1,
                actual: neural.output_width(),
            });
        }
        Ok(Self {
            schema,
            scaler,
            tree,
            neural,
        })
    }

    /// Load all four artifacts from a directory of JSON files.
    ///
    /// The classifier files use the [`LinearModel`] reference format; swap in
    /// another [`Classifier`] via [`ArtifactSet::new`] for other runtimes.
    pub fn load(dir: &Path) -> Result<Self> {
        let schema: ColumnSchema = load_json(dir, file::MODEL_COLUMNS)?;
        let scaler: Scaler = load_json(dir, file::SCALER)?;
        let tree: LinearModel = load_json(dir, file::TREE_MODEL)?;
        tree.validate(TREE_MODEL_NAME)?;
        let neural: LinearModel = load_json(dir, file::NEURAL_MODEL)?;
        neural.validate(NEURAL_MODEL_NAME)?;
        info!(
            dir = %dir.display(),
            columns = schema.len(),
            "loaded screening artifacts"
        );
        Self::new(schema, scaler, Box::new(tree), Box::new(neural))
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub(crate) fn tree(&self) -> &dyn Classifier {
        self.tree.as_ref()
    }

    pub(crate) fn neural(&self) -> &dyn Classifier {
        self.neural.as_ref()
    }
}

fn check_input_width(model: &'static str, classifier: &dyn Classifier, schema: usize) -> Result<()> {
    if classifier.input_width() != schema {
        return Err(InferError::InputWidthMismatch {
            model,
            expected: classifier.input_width(),
            actual: schema,
        });
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<T> {
    let path = dir.join(name);
    let text = fs::read_to_string(&path).map_err(|source| InferError::ArtifactRead {
        name: name.to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| InferError::ArtifactParse {
        name: name.to_string(),
        source,
    })
}
