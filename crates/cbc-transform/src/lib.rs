//! Feature engineering for the CBC screening models.
//!
//! The pipeline is deterministic: rule evaluation classifies each lab value
//! into named status buckets, the encoder expands those into one-hot
//! indicator columns, and the assembler joins everything against the trained
//! column schema and scales the numeric subset. Column identity, order, and
//! fill values are exact-match contracts with the trained models.

pub mod assemble;
pub mod coerce;
pub mod encode;
pub mod error;
pub mod rules;
pub mod scale;
pub mod schema;

pub use assemble::{FeatureVector, assemble};
pub use coerce::{CoercedBatch, CoercedRecord, RawPanel, RowError, coerce_batch};
pub use encode::indicator_columns;
pub use error::{Result, TransformError};
pub use rules::evaluate;
pub use scale::{MinMaxParams, Scaler, StandardParams};
pub use schema::{ColumnSchema, NUMERIC_FEATURES};
