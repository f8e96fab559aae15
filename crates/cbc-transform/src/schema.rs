//! The trained model's expected column layout.

use serde::{Deserialize, Serialize};

/// Raw feature column names as they appear in the trained schema.
pub mod column {
    pub const SEX: &str = "sex";
    pub const AGE_Y: &str = "age_y";
    pub const HCT: &str = "HCT";
    pub const MCV: &str = "MCV";
    pub const WBC: &str = "WBC";
    pub const NEUTROPHILE: &str = "NEUTROPHILE";
    pub const EOSINOPHILE: &str = "EOSINOPHILE";
    pub const MONOCYTE: &str = "MONOCYTE";
    pub const PLT_COUNT: &str = "PLT_COUNT";
}

/// Columns the numeric scaler was fitted on. Indicator columns and the sex
/// code are never scaled.
pub const NUMERIC_FEATURES: [&str; 8] = [
    column::HCT,
    column::MCV,
    column::WBC,
    column::NEUTROPHILE,
    column::EOSINOPHILE,
    column::MONOCYTE,
    column::PLT_COUNT,
    column::AGE_Y,
];

/// Returns true if `name` is one of the scaled numeric feature columns.
pub fn is_numeric_feature(name: &str) -> bool {
    NUMERIC_FEATURES.contains(&name)
}

/// Ordered list of column names the classifiers expect, fixed at training
/// time and loaded as an artifact.
///
/// The feature assembler reindexes every record against this schema: column
/// identity and position here dictate the feature vector exactly. A missing
/// or reordered schema silently corrupts every downstream prediction, so the
/// schema is loaded once at startup and treated as immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSchema {
    columns: Vec<String>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column by exact name, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Schema columns that belong to the scaled numeric feature list.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|name| is_numeric_feature(name))
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSchema {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
