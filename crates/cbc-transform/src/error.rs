use thiserror::Error;

/// Structural failures of the feature pipeline. Rule evaluation itself has no
/// error paths; these arise only from artifact mismatches or unfillable
/// batch input.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A numeric schema column has no fitted scaler parameters.
    #[error("scaler has no parameters for numeric column {column:?}")]
    ScalerMissingColumn { column: String },

    /// A batch field was missing in every row, so no median is available
    /// to fill it.
    #[error("field {field:?} has no parseable value in the batch; cannot median-fill")]
    NoFillValue { field: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
