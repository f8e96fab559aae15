//! Batch input coercion: text-to-numeric parsing with batch-median fill.
//!
//! Batch files arrive with lab values as text, sometimes with thousands
//! separators, sometimes blank. Each numeric field is parsed after stripping
//! separators; values that fail to parse become missing and are filled with
//! the median of that field across the batch. Median statistics are
//! batch-wide by design: all rows contribute, and single-record batches
//! degrade to "median of one value". A field with no parseable value in any
//! row cannot be filled and fails the whole batch.
//!
//! Sex is handled separately: an unrecognized sex is a row-level error, never
//! a default. Affected rows are reported and skipped while the rest of the
//! batch proceeds.

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use cbc_model::{PatientRecord, Sex};

use crate::error::{Result, TransformError};

/// One unparsed batch row, as read from CSV. All fields are raw text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPanel {
    #[serde(default)]
    pub sex: String,
    #[serde(default)]
    pub age_y: String,
    #[serde(rename = "HCT", default)]
    pub hct: String,
    #[serde(rename = "MCV", default)]
    pub mcv: String,
    #[serde(rename = "WBC", default)]
    pub wbc: String,
    #[serde(rename = "NEUTROPHILE", default)]
    pub neutrophile: String,
    #[serde(rename = "EOSINOPHILE", default)]
    pub eosinophile: String,
    #[serde(rename = "MONOCYTE", default)]
    pub monocyte: String,
    #[serde(rename = "PLT_COUNT", default)]
    pub plt_count: String,
}

/// A coercion failure for a single batch row.
#[derive(Debug, Clone, Error)]
#[error("row {row}: {message}")]
pub struct RowError {
    /// Zero-based index into the input batch.
    pub row: usize,
    pub message: String,
}

/// One successfully coerced row, tagged with its original batch position.
#[derive(Debug, Clone)]
pub struct CoercedRecord {
    pub row: usize,
    pub record: PatientRecord,
}

/// Outcome of coercing a batch: typed records plus per-row failures.
#[derive(Debug, Clone, Default)]
pub struct CoercedBatch {
    pub records: Vec<CoercedRecord>,
    pub errors: Vec<RowError>,
}

/// Parse one lab value from text: trim, strip `,` thousands separators,
/// then parse as f64. Blank, unparseable, or non-finite input is missing.
pub fn parse_lab_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped: String = trimmed.chars().filter(|ch| *ch != ',').collect();
    stripped.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Median of a slice. Even-length slices take the mean of the two middle
/// values. Returns `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

const NUMERIC_FIELD_COUNT: usize = 8;

const NUMERIC_FIELD_NAMES: [&str; NUMERIC_FIELD_COUNT] = [
    "age_y",
    "HCT",
    "MCV",
    "WBC",
    "NEUTROPHILE",
    "EOSINOPHILE",
    "MONOCYTE",
    "PLT_COUNT",
];

fn numeric_fields(panel: &RawPanel) -> [Option<f64>; NUMERIC_FIELD_COUNT] {
    [
        parse_lab_value(&panel.age_y),
        parse_lab_value(&panel.hct),
        parse_lab_value(&panel.mcv),
        parse_lab_value(&panel.wbc),
        parse_lab_value(&panel.neutrophile),
        parse_lab_value(&panel.eosinophile),
        parse_lab_value(&panel.monocyte),
        parse_lab_value(&panel.plt_count),
    ]
}

/// Coerce a batch of raw panels into typed records.
///
/// All rows contribute to the per-field median statistics, including rows
/// later rejected for an invalid sex. Fails only when a field needs filling
/// and has no parseable value anywhere in the batch.
pub fn coerce_batch(panels: &[RawPanel]) -> Result<CoercedBatch> {
    if panels.is_empty() {
        return Ok(CoercedBatch::default());
    }

    let parsed: Vec<[Option<f64>; NUMERIC_FIELD_COUNT]> =
        panels.iter().map(numeric_fields).collect();

    // One batch-wide fill value per field, computed lazily per column.
    let mut fill = [None; NUMERIC_FIELD_COUNT];
    for (index, name) in NUMERIC_FIELD_NAMES.iter().enumerate() {
        let present: Vec<f64> = parsed.iter().filter_map(|row| row[index]).collect();
        if present.len() < panels.len() {
            let value = median(&present).ok_or_else(|| TransformError::NoFillValue {
                field: (*name).to_string(),
            })?;
            debug!(field = name, fill = value, "median-filling missing values");
            fill[index] = Some(value);
        }
    }

    let mut batch = CoercedBatch::default();
    for (row, (panel, values)) in panels.iter().zip(&parsed).enumerate() {
        let sex = match panel.sex.parse::<Sex>() {
            Ok(sex) => sex,
            Err(error) => {
                warn!(row, %error, "skipping batch row");
                batch.errors.push(RowError {
                    row,
                    message: error.to_string(),
                });
                continue;
            }
        };
        let mut filled = [0.0; NUMERIC_FIELD_COUNT];
        for (index, value) in values.iter().enumerate() {
            // fill[index] is always Some when any row was missing this field
            filled[index] = value.or(fill[index]).unwrap_or_default();
        }
        // Ages are whole years; a fill value landing between two ages rounds
        // to the nearest year.
        let age_y = filled[0].round().max(0.0) as u32;
        batch.records.push(CoercedRecord {
            row,
            record: PatientRecord {
                sex,
                age_y,
                hct: filled[1],
                mcv: filled[2],
                wbc: filled[3],
                neutrophile: filled[4],
                eosinophile: filled[5],
                monocyte: filled[6],
                plt_count: filled[7],
            },
        });
    }
    debug!(
        rows = panels.len(),
        coerced = batch.records.len(),
        rejected = batch.errors.len(),
        "coerced batch"
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(sex: &str, hct: &str, plt: &str) -> RawPanel {
        RawPanel {
            sex: sex.to_string(),
            age_y: "30".to_string(),
            hct: hct.to_string(),
            mcv: "85".to_string(),
            wbc: "7500".to_string(),
            neutrophile: "60".to_string(),
            eosinophile: "2".to_string(),
            monocyte: "5".to_string(),
            plt_count: plt.to_string(),
        }
    }

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse_lab_value("250,000"), Some(250000.0));
        assert_eq!(parse_lab_value(" 7,500 "), Some(7500.0));
        assert_eq!(parse_lab_value(""), None);
        assert_eq!(parse_lab_value("n/a"), None);
    }

    #[test]
    fn median_even_count_averages_middle_pair() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn missing_values_fill_with_batch_median() {
        let panels = vec![
            panel("Female", "36", "250,000"),
            panel("Male", "", "200000"),
            panel("Female", "40", "300000"),
        ];
        let batch = coerce_batch(&panels).expect("coerce");
        assert!(batch.errors.is_empty());
        assert_eq!(batch.records.len(), 3);
        // Median of the two present HCT values: (36 + 40) / 2
        assert_eq!(batch.records[1].record.hct, 38.0);
        assert_eq!(batch.records[0].record.plt_count, 250000.0);
    }

    #[test]
    fn invalid_sex_is_a_row_error_not_a_default() {
        let panels = vec![
            panel("Female", "38", "250000"),
            panel("unknown", "41", "250000"),
        ];
        let batch = coerce_batch(&panels).expect("coerce");
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].row, 1);
    }

    #[test]
    fn rejected_rows_still_contribute_to_medians() {
        let panels = vec![
            panel("Female", "", "250000"),
            panel("unknown", "42", "250000"),
        ];
        let batch = coerce_batch(&panels).expect("coerce");
        // The only parseable HCT comes from the row later rejected for sex.
        assert_eq!(batch.records[0].record.hct, 42.0);
    }

    #[test]
    fn unfillable_field_fails_the_batch() {
        let mut first = panel("Female", "38", "250000");
        let mut second = panel("Male", "45", "250000");
        first.wbc = String::new();
        second.wbc = "bad".to_string();
        let err = coerce_batch(&[first, second]).unwrap_err();
        assert!(matches!(
            err,
            TransformError::NoFillValue { ref field } if field == "WBC"
        ));
    }

    #[test]
    fn single_row_batch_degrades_to_identity() {
        let panels = vec![panel("Male", "45", "250000")];
        let batch = coerce_batch(&panels).expect("coerce");
        assert_eq!(batch.records[0].record.hct, 45.0);
    }
}
