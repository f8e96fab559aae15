//! Data model for the CBC screening service: patient records, rule-derived
//! status labels, and prediction results.

pub mod error;
pub mod prediction;
pub mod record;
pub mod status;

pub use error::ParseSexError;
pub use prediction::{CONDITION_LABELS, PredictionResult, ScreenResponse};
pub use record::{PatientRecord, Sex};
pub use status::{
    EosStatus, HctStatus, McvStatus, MonoStatus, PltStatus, StatusLabelSet, WbcStatus,
};
