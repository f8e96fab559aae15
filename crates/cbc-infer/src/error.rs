use thiserror::Error;

use cbc_transform::TransformError;

/// Inference-side failures. Everything here is a configuration problem —
/// the per-record pipeline itself has no recoverable error paths.
#[derive(Debug, Error)]
pub enum InferError {
    #[error("failed to read artifact {name}: {source}")]
    ArtifactRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {name}: {source}")]
    ArtifactParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A classifier's expected input width does not match the schema.
    #[error("{model} expects {expected} input columns, schema has {actual}")]
    InputWidthMismatch {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A classifier produces fewer outputs than the label map consumes.
    #[error("{model} produces {actual} outputs, need at least {required}")]
    OutputWidthMismatch {
        model: &'static str,
        required: usize,
        actual: usize,
    },

    /// A model artifact is internally inconsistent.
    #[error("{model} artifact is malformed: {detail}")]
    MalformedModel { model: &'static str, detail: String },

    /// The scaler was not fitted on a numeric schema column.
    #[error("scaler is missing numeric schema column {column:?}")]
    ScalerSchemaMismatch { column: String },

    /// A classifier returned an unexpected output shape at predict time.
    #[error("{model} returned {actual} outputs for one record, expected {expected}")]
    BadPrediction {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),
}

pub type Result<T> = std::result::Result<T, InferError>;
