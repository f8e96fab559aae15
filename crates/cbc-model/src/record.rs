use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseSexError;

/// Patient sex as reported on the CBC requisition.
///
/// The trained models encode sex numerically (Male = 0, Female = 1); the
/// string forms here are the exact values accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Numeric code used in the feature vector (Male = 0, Female = 1).
    pub fn numeric_code(&self) -> f64 {
        match self {
            Sex::Male => 0.0,
            Sex::Female => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ParseSexError;

    /// Parse a sex string, case-insensitively after trimming.
    ///
    /// Anything other than Male/Female is rejected rather than silently
    /// coerced to a default code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("MALE") {
            Ok(Sex::Male)
        } else if trimmed.eq_ignore_ascii_case("FEMALE") {
            Ok(Sex::Female)
        } else {
            Err(ParseSexError(s.to_string()))
        }
    }
}

/// One CBC panel submission.
///
/// Field names mirror the wire contract of the screening endpoint. Counts are
/// absolute (cells/µL); NEUTROPHILE, EOSINOPHILE and MONOCYTE are percentages
/// of the white cell count. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub sex: Sex,
    /// Age in whole years.
    pub age_y: u32,
    /// Hematocrit, percent.
    #[serde(rename = "HCT")]
    pub hct: f64,
    /// Mean corpuscular volume, femtoliters.
    #[serde(rename = "MCV")]
    pub mcv: f64,
    /// White blood cell count, cells/µL.
    #[serde(rename = "WBC")]
    pub wbc: f64,
    /// Neutrophils, percent of WBC.
    #[serde(rename = "NEUTROPHILE")]
    pub neutrophile: f64,
    /// Eosinophils, percent of WBC.
    #[serde(rename = "EOSINOPHILE")]
    pub eosinophile: f64,
    /// Monocytes, percent of WBC.
    #[serde(rename = "MONOCYTE")]
    pub monocyte: f64,
    /// Platelet count, cells/µL.
    #[serde(rename = "PLT_COUNT")]
    pub plt_count: f64,
}

impl PatientRecord {
    /// Absolute neutrophil count (cells/µL) derived from WBC and the
    /// neutrophil percentage.
    pub fn absolute_neutrophils(&self) -> f64 {
        self.wbc * self.neutrophile / 100.0
    }

    /// Absolute eosinophil count (cells/µL).
    pub fn absolute_eosinophils(&self) -> f64 {
        self.wbc * self.eosinophile / 100.0
    }
}
