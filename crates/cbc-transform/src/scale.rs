//! Pre-fitted numeric scaling, applied to the designated numeric columns
//! after schema reindexing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fitted parameters for one standard-scaled column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardParams {
    pub mean: f64,
    pub scale: f64,
}

/// Fitted parameters for one min-max-scaled column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxParams {
    pub min: f64,
    pub max: f64,
}

/// Per-column scaling transform exported from the training pipeline.
///
/// Two scaler kinds are supported: `standard` computes (x - mean) / scale,
/// `min-max` computes (x - min) / (max - min). Columns the scaler was not
/// fitted on have no entry; asking to transform one is an artifact mismatch,
/// not a silent pass-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Scaler {
    Standard { columns: BTreeMap<String, StandardParams> },
    MinMax { columns: BTreeMap<String, MinMaxParams> },
}

impl Scaler {
    /// True if the scaler was fitted on the named column.
    pub fn has_column(&self, name: &str) -> bool {
        match self {
            Scaler::Standard { columns } => columns.contains_key(name),
            Scaler::MinMax { columns } => columns.contains_key(name),
        }
    }

    /// Names of all fitted columns.
    pub fn fitted_columns(&self) -> Vec<&str> {
        match self {
            Scaler::Standard { columns } => columns.keys().map(String::as_str).collect(),
            Scaler::MinMax { columns } => columns.keys().map(String::as_str).collect(),
        }
    }

    /// Transform one value. Returns `None` when the scaler has no parameters
    /// for the column.
    ///
    /// A degenerate denominator (zero or non-finite) leaves only the offset
    /// applied, matching how fitted scalers neutralize zero-variance columns.
    pub fn transform(&self, name: &str, value: f64) -> Option<f64> {
        let (offset, denom) = match self {
            Scaler::Standard { columns } => {
                let params = columns.get(name)?;
                (params.mean, params.scale)
            }
            Scaler::MinMax { columns } => {
                let params = columns.get(name)?;
                (params.min, params.max - params.min)
            }
        };
        if denom == 0.0 || !denom.is_finite() {
            Some(value - offset)
        } else {
            Some((value - offset) / denom)
        }
    }
}
