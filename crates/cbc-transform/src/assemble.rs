//! Feature assembly: merge raw fields with indicator columns, reindex
//! against the trained schema, and scale the numeric subset.
//!
//! The reindex is an explicit join keyed by column name. This is the highest
//! risk point of the whole pipeline: a naming or ordering mismatch here does
//! not raise an error, it silently corrupts every downstream prediction. The
//! join is therefore kept in one place and pinned down by tests.

use std::collections::HashMap;

use tracing::trace;

use cbc_model::{PatientRecord, StatusLabelSet};

use crate::encode::indicator_columns;
use crate::error::{Result, TransformError};
use crate::scale::Scaler;
use crate::schema::{ColumnSchema, column, is_numeric_feature};

/// A schema-ordered numeric feature row, ready for inference.
///
/// Invariant: exactly one value per schema column, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Assemble the feature vector for one record.
///
/// Steps, in order (each is a correctness invariant, not a style choice):
/// 1. sex becomes its numeric code (Male 0, Female 1);
/// 2. raw numerics, age, sex code and the record's indicator columns form
///    one named row;
/// 3. the row is reindexed against the schema — schema columns absent from
///    the row are filled with 0, row columns absent from the schema are
///    dropped;
/// 4. the designated numeric columns are scaled in place. Indicators and the
///    sex code are never scaled.
pub fn assemble(
    record: &PatientRecord,
    labels: &StatusLabelSet,
    schema: &ColumnSchema,
    scaler: &Scaler,
) -> Result<FeatureVector> {
    let mut row: HashMap<String, f64> = HashMap::with_capacity(16);
    row.insert(column::SEX.to_string(), record.sex.numeric_code());
    row.insert(column::AGE_Y.to_string(), f64::from(record.age_y));
    row.insert(column::HCT.to_string(), record.hct);
    row.insert(column::MCV.to_string(), record.mcv);
    row.insert(column::WBC.to_string(), record.wbc);
    row.insert(column::NEUTROPHILE.to_string(), record.neutrophile);
    row.insert(column::EOSINOPHILE.to_string(), record.eosinophile);
    row.insert(column::MONOCYTE.to_string(), record.monocyte);
    row.insert(column::PLT_COUNT.to_string(), record.plt_count);
    for indicator in indicator_columns(labels) {
        row.insert(indicator, 1.0);
    }

    let mut values = Vec::with_capacity(schema.len());
    for name in schema.columns() {
        let raw = row.get(name.as_str()).copied().unwrap_or(0.0);
        let value = if is_numeric_feature(name) {
            scaler
                .transform(name, raw)
                .ok_or_else(|| TransformError::ScalerMissingColumn {
                    column: name.clone(),
                })?
        } else {
            raw
        };
        values.push(value);
    }
    trace!(columns = values.len(), "assembled feature vector");
    Ok(FeatureVector { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::evaluate;
    use crate::scale::StandardParams;
    use cbc_model::Sex;
    use std::collections::BTreeMap;

    fn identity_scaler() -> Scaler {
        let columns: BTreeMap<String, StandardParams> = crate::schema::NUMERIC_FEATURES
            .iter()
            .map(|name| {
                (
                    (*name).to_string(),
                    StandardParams {
                        mean: 0.0,
                        scale: 1.0,
                    },
                )
            })
            .collect();
        Scaler::Standard { columns }
    }

    fn normal_female() -> PatientRecord {
        PatientRecord {
            sex: Sex::Female,
            age_y: 30,
            hct: 38.0,
            mcv: 85.0,
            wbc: 7500.0,
            neutrophile: 60.0,
            eosinophile: 2.0,
            monocyte: 5.0,
            plt_count: 250000.0,
        }
    }

    fn schema() -> ColumnSchema {
        [
            "HCT",
            "MCV",
            "WBC",
            "NEUTROPHILE",
            "EOSINOPHILE",
            "MONOCYTE",
            "PLT_COUNT",
            "age_y",
            "sex",
            "HCT_status_normal",
            "HCT_status_mild anemia",
            "HCT_status_moderate anemia",
            "HCT_status_severe anemia",
            "MCV_status_microcytic",
            "MCV_status_normal",
            "MCV_status_macrocytic",
            "WBC_status_normal",
            "WBC_status_low",
            "WBC_status_dangerously low",
            "WBC_status_high",
            "WBC_status_very high",
            "EOS_status_eosinophil high",
            "MONO_status_monocyte high",
            "PLT_status_low",
            "PLT_status_normal",
            "PLT_status_high",
            "PLT_status_very high",
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn vector_matches_schema_width_and_order() {
        let record = normal_female();
        let labels = evaluate(&record);
        let schema = schema();
        let features = assemble(&record, &labels, &schema, &identity_scaler()).unwrap();
        assert_eq!(features.len(), schema.len());
        // Raw block in schema order.
        assert_eq!(features.values()[0], 38.0); // HCT
        assert_eq!(features.values()[7], 30.0); // age_y
        assert_eq!(features.values()[8], 1.0); // sex: Female
    }

    #[test]
    fn absent_indicator_columns_fill_with_zero() {
        let record = normal_female();
        let labels = evaluate(&record);
        let schema = schema();
        let features = assemble(&record, &labels, &schema, &identity_scaler()).unwrap();
        let at = |name: &str| features.values()[schema.position(name).unwrap()];
        assert_eq!(at("HCT_status_normal"), 1.0);
        assert_eq!(at("HCT_status_moderate anemia"), 0.0);
        assert_eq!(at("WBC_status_normal"), 1.0);
        assert_eq!(at("EOS_status_eosinophil high"), 0.0);
        assert_eq!(at("MONO_status_monocyte high"), 0.0);
        assert_eq!(at("PLT_status_normal"), 1.0);
    }

    #[test]
    fn row_columns_outside_schema_are_dropped() {
        let record = normal_female();
        let labels = evaluate(&record);
        // Schema without any MCV indicator columns: MCV_status_normal from
        // the record simply has no destination.
        let schema: ColumnSchema = ["HCT", "sex", "HCT_status_normal"].into_iter().collect();
        let features = assemble(&record, &labels, &schema, &identity_scaler()).unwrap();
        assert_eq!(features.values(), &[38.0, 1.0, 1.0]);
    }

    #[test]
    fn scaling_applies_only_to_numeric_columns_after_reindex() {
        let record = normal_female();
        let labels = evaluate(&record);
        let schema: ColumnSchema = ["HCT", "sex", "HCT_status_normal"].into_iter().collect();
        let scaler = Scaler::Standard {
            columns: [(
                "HCT".to_string(),
                StandardParams {
                    mean: 38.0,
                    scale: 2.0,
                },
            )]
            .into(),
        };
        let features = assemble(&record, &labels, &schema, &scaler).unwrap();
        // HCT scaled to 0, sex code and indicator untouched.
        assert_eq!(features.values(), &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn missing_scaler_column_is_an_error() {
        let record = normal_female();
        let labels = evaluate(&record);
        let schema: ColumnSchema = ["HCT", "MCV"].into_iter().collect();
        let scaler = Scaler::Standard {
            columns: [(
                "HCT".to_string(),
                StandardParams {
                    mean: 0.0,
                    scale: 1.0,
                },
            )]
            .into(),
        };
        let err = assemble(&record, &labels, &schema, &scaler).unwrap_err();
        assert!(matches!(
            err,
            TransformError::ScalerMissingColumn { ref column } if column == "MCV"
        ));
    }

    #[test]
    fn assembly_is_deterministic() {
        let record = normal_female();
        let labels = evaluate(&record);
        let schema = schema();
        let scaler = identity_scaler();
        let first = assemble(&record, &labels, &schema, &scaler).unwrap();
        let second = assemble(&record, &labels, &schema, &scaler).unwrap();
        assert_eq!(first, second);
    }
}
