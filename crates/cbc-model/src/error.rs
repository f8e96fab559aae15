use thiserror::Error;

/// Sex value that is neither Male nor Female.
#[derive(Debug, Clone, Error)]
#[error("unrecognized sex value: {0:?} (expected Male or Female)")]
pub struct ParseSexError(pub String);
