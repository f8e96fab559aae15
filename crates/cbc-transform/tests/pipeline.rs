//! End-to-end feature pipeline tests: record through rules, encoding,
//! assembly and scaling, asserting intermediate feature vector content
//! independent of any model weights.

use std::collections::BTreeMap;

use cbc_model::{PatientRecord, Sex};
use cbc_transform::schema::ColumnSchema;
use cbc_transform::{NUMERIC_FEATURES, Scaler, StandardParams, assemble, evaluate};

/// Schema in the layout the training pipeline exports: raw numerics, sex
/// code, then every indicator column observed during training.
fn trained_schema() -> ColumnSchema {
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
        "HCT_status_mild anemia",
        "HCT_status_moderate anemia",
        "HCT_status_normal",
        "HCT_status_severe anemia",
        "MCV_status_macrocytic",
        "MCV_status_microcytic",
        "MCV_status_normal",
        "WBC_status_dangerously low",
        "WBC_status_high",
        "WBC_status_low",
        "WBC_status_normal",
        "WBC_status_very high",
        "EOS_status_eosinophil high",
        "MONO_status_monocyte high",
        "PLT_status_high",
        "PLT_status_low",
        "PLT_status_normal",
        "PLT_status_very high",
    ]
    .into_iter()
    .collect()
}

fn trained_scaler() -> Scaler {
    let columns: BTreeMap<String, StandardParams> = [
        ("HCT", 38.5, 5.2),
        ("MCV", 82.0, 9.5),
        ("WBC", 8200.0, 2600.0),
        ("NEUTROPHILE", 58.0, 11.0),
        ("EOSINOPHILE", 2.8, 2.1),
        ("MONOCYTE", 5.4, 1.9),
        ("PLT_COUNT", 285000.0, 81000.0),
        ("age_y", 41.0, 17.0),
    ]
    .into_iter()
    .map(|(name, mean, scale)| (name.to_string(), StandardParams { mean, scale }))
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

#[test]
fn normal_profile_sets_only_normal_indicators() {
    let record = normal_female();
    let schema = trained_schema();
    let labels = evaluate(&record);
    assert!(labels.is_unremarkable());

    let features = assemble(&record, &labels, &schema, &trained_scaler()).expect("assemble");
    assert_eq!(features.len(), schema.len());

    let at = |name: &str| features.values()[schema.position(name).expect(name)];
    for name in [
        "HCT_status_normal",
        "MCV_status_normal",
        "WBC_status_normal",
        "PLT_status_normal",
    ] {
        assert_eq!(at(name), 1.0, "{name}");
    }
    for name in [
        "HCT_status_mild anemia",
        "HCT_status_moderate anemia",
        "HCT_status_severe anemia",
        "MCV_status_macrocytic",
        "MCV_status_microcytic",
        "WBC_status_dangerously low",
        "WBC_status_high",
        "WBC_status_low",
        "WBC_status_very high",
        "EOS_status_eosinophil high",
        "MONO_status_monocyte high",
        "PLT_status_high",
        "PLT_status_low",
        "PLT_status_very high",
    ] {
        assert_eq!(at(name), 0.0, "{name}");
    }
    assert_eq!(at("sex"), 1.0);
}

#[test]
fn numeric_block_is_standard_scaled() {
    let record = normal_female();
    let schema = trained_schema();
    let features =
        assemble(&record, &evaluate(&record), &schema, &trained_scaler()).expect("assemble");
    let at = |name: &str| features.values()[schema.position(name).expect(name)];
    assert!((at("HCT") - (38.0 - 38.5) / 5.2).abs() < 1e-12);
    assert!((at("WBC") - (7500.0 - 8200.0) / 2600.0).abs() < 1e-12);
    assert!((at("age_y") - (30.0 - 41.0) / 17.0).abs() < 1e-12);
}

#[test]
fn microcytic_anemia_profile_moves_indicators() {
    let record = PatientRecord {
        sex: Sex::Male,
        age_y: 55,
        hct: 29.0,
        mcv: 68.0,
        wbc: 7000.0,
        neutrophile: 55.0,
        eosinophile: 2.0,
        monocyte: 4.0,
        plt_count: 300000.0,
    };
    let schema = trained_schema();
    let features =
        assemble(&record, &evaluate(&record), &schema, &trained_scaler()).expect("assemble");
    let at = |name: &str| features.values()[schema.position(name).expect(name)];
    assert_eq!(at("HCT_status_moderate anemia"), 1.0);
    assert_eq!(at("HCT_status_normal"), 0.0);
    assert_eq!(at("MCV_status_microcytic"), 1.0);
    assert_eq!(at("sex"), 0.0);
}

#[test]
fn every_profile_fills_the_full_schema() {
    // Sweep a grid of extreme values; the vector width never varies.
    let schema = trained_schema();
    let scaler = trained_scaler();
    for hct in [5.0, 30.0, 45.0, 70.0] {
        for wbc in [500.0, 5000.0, 15000.0, 30000.0] {
            for plt in [50000.0, 250000.0, 500000.0, 700000.0] {
                let record = PatientRecord {
                    sex: Sex::Male,
                    age_y: 40,
                    hct,
                    mcv: 85.0,
                    wbc,
                    neutrophile: 50.0,
                    eosinophile: 8.0,
                    monocyte: 7.0,
                    plt_count: plt,
                };
                let features = assemble(&record, &evaluate(&record), &schema, &scaler)
                    .expect("assemble");
                assert_eq!(features.len(), schema.len());
                // Exactly one indicator per always-present category.
                let count = |prefix: &str| {
                    schema
                        .columns()
                        .iter()
                        .enumerate()
                        .filter(|(_, name)| name.starts_with(prefix))
                        .map(|(index, _)| features.values()[index])
                        .sum::<f64>()
                };
                assert_eq!(count("HCT_status_"), 1.0);
                assert_eq!(count("WBC_status_"), 1.0);
                assert_eq!(count("PLT_status_"), 1.0);
            }
        }
    }
}

#[test]
fn schema_missing_trained_indicators_still_assembles() {
    // A schema narrower than the record's label set drops the extras.
    let record = normal_female();
    let schema: ColumnSchema = ["HCT", "sex"].into_iter().collect();
    let scaler = Scaler::Standard {
        columns: NUMERIC_FEATURES
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
            .collect(),
    };
    let features = assemble(&record, &evaluate(&record), &schema, &scaler).expect("assemble");
    assert_eq!(features.values(), &[38.0, 1.0]);
}
