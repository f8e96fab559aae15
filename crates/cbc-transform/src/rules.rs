//! Threshold-based rule evaluation of a CBC panel.
//!
//! Classifies each lab value into a named physiological status bucket, per
//! sex where the reference ranges differ. The rules are part of the trained
//! feature contract: every label produced here becomes a one-hot indicator
//! column, so threshold boundaries and label text must stay exactly as the
//! models saw them during training.

use cbc_model::{
    EosStatus, HctStatus, McvStatus, MonoStatus, PatientRecord, PltStatus, Sex, StatusLabelSet,
    WbcStatus,
};

/// Absolute neutrophil count below which a low WBC is dangerously low.
const ANC_DANGER_THRESHOLD: f64 = 1000.0;

/// Absolute eosinophil count above which the EOS flag is raised.
const AEC_HIGH_THRESHOLD: f64 = 500.0;

/// Monocyte percentage above which the MONO flag is raised.
const MONOCYTE_HIGH_PERCENT: f64 = 6.0;

/// Evaluate all status rules for one record.
///
/// Pure and total: every branch set covers the full numeric domain via a
/// trailing severe/very-high tier, so no input produces an error.
pub fn evaluate(record: &PatientRecord) -> StatusLabelSet {
    StatusLabelSet {
        hct: hct_status(record.sex, record.hct),
        mcv: mcv_status(record.mcv),
        wbc: wbc_status(record.wbc, record.neutrophile),
        eos: eos_status(record.wbc, record.eosinophile),
        mono: mono_status(record.monocyte),
        plt: plt_status(record.plt_count),
    }
}

/// Hematocrit tiers. Male reference range is [42, 54], female [36, 48];
/// the anemia tiers below share the 33 and 27 cut points. Values above the
/// normal range fall through to severe, matching the trained rule set.
fn hct_status(sex: Sex, hct: f64) -> HctStatus {
    let (normal_low, normal_high, mild_low) = match sex {
        Sex::Male => (42.0, 54.0, 33.0),
        Sex::Female => (36.0, 48.0, 33.0),
    };
    if (normal_low..=normal_high).contains(&hct) {
        HctStatus::Normal
    } else if (mild_low..normal_low).contains(&hct) {
        HctStatus::MildAnemia
    } else if (27.0..mild_low).contains(&hct) {
        HctStatus::ModerateAnemia
    } else {
        HctStatus::SevereAnemia
    }
}

/// Red cell size from mean corpuscular volume: [80, 100] is normocytic.
fn mcv_status(mcv: f64) -> McvStatus {
    if mcv < 80.0 {
        McvStatus::Microcytic
    } else if mcv <= 100.0 {
        McvStatus::Normal
    } else {
        McvStatus::Macrocytic
    }
}

/// White cell count tiers. A low count is split on the absolute neutrophil
/// count: below 1000 cells/µL it is dangerously low.
fn wbc_status(wbc: f64, neutrophile: f64) -> WbcStatus {
    if (6000.0..=10000.0).contains(&wbc) {
        WbcStatus::Normal
    } else if wbc < 6000.0 {
        if wbc * neutrophile / 100.0 < ANC_DANGER_THRESHOLD {
            WbcStatus::DangerouslyLow
        } else {
            WbcStatus::Low
        }
    } else if wbc <= 20000.0 {
        WbcStatus::High
    } else {
        WbcStatus::VeryHigh
    }
}

/// Eosinophil flag: raised only when the absolute eosinophil count exceeds
/// 500 cells/µL. No label is produced otherwise.
fn eos_status(wbc: f64, eosinophile: f64) -> Option<EosStatus> {
    (wbc * eosinophile / 100.0 > AEC_HIGH_THRESHOLD).then_some(EosStatus::High)
}

/// Monocyte flag: raised only above 6% of the white cell count.
fn mono_status(monocyte: f64) -> Option<MonoStatus> {
    (monocyte > MONOCYTE_HIGH_PERCENT).then_some(MonoStatus::High)
}

/// Platelet tiers: [100000, 450000] is normal, (450000, 600000] high.
fn plt_status(plt_count: f64) -> PltStatus {
    if plt_count < 100000.0 {
        PltStatus::Low
    } else if plt_count <= 450000.0 {
        PltStatus::Normal
    } else if plt_count <= 600000.0 {
        PltStatus::High
    } else {
        PltStatus::VeryHigh
    }
}
