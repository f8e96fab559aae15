use serde::{Deserialize, Serialize};
use std::fmt;

/// Hematocrit status tiers. Threshold ranges are sex-dependent; the labels
/// are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HctStatus {
    Normal,
    MildAnemia,
    ModerateAnemia,
    SevereAnemia,
}

impl HctStatus {
    /// Label text exactly as it appears in trained indicator column names.
    pub fn as_str(&self) -> &'static str {
        match self {
            HctStatus::Normal => "normal",
            HctStatus::MildAnemia => "mild anemia",
            HctStatus::ModerateAnemia => "moderate anemia",
            HctStatus::SevereAnemia => "severe anemia",
        }
    }
}

/// Mean corpuscular volume status (red cell size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum McvStatus {
    Microcytic,
    Normal,
    Macrocytic,
}

impl McvStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            McvStatus::Microcytic => "microcytic",
            McvStatus::Normal => "normal",
            McvStatus::Macrocytic => "macrocytic",
        }
    }
}

/// White cell count status. The low tier splits on absolute neutrophils:
/// below 1000 cells/µL the count is dangerously low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WbcStatus {
    Normal,
    Low,
    DangerouslyLow,
    High,
    VeryHigh,
}

impl WbcStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WbcStatus::Normal => "normal",
            WbcStatus::Low => "low",
            WbcStatus::DangerouslyLow => "dangerously low",
            WbcStatus::High => "high",
            WbcStatus::VeryHigh => "very high",
        }
    }
}

/// Eosinophil status. Only ever reported as high; the absent case carries no
/// label at all (see [`StatusLabelSet`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EosStatus {
    High,
}

impl EosStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EosStatus::High => "eosinophil high",
        }
    }
}

/// Monocyte status. Only ever reported as high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonoStatus {
    High,
}

impl MonoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MonoStatus::High => "monocyte high",
        }
    }
}

/// Platelet count status tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PltStatus {
    Low,
    Normal,
    High,
    VeryHigh,
}

impl PltStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PltStatus::Low => "low",
            PltStatus::Normal => "normal",
            PltStatus::High => "high",
            PltStatus::VeryHigh => "very high",
        }
    }
}

/// Category keys under which each status is reported. These prefix the
/// one-hot indicator column names and must match the trained schema.
pub mod category {
    pub const HCT: &str = "HCT_status";
    pub const MCV: &str = "MCV_status";
    pub const WBC: &str = "WBC_status";
    pub const EOS: &str = "EOS_status";
    pub const MONO: &str = "MONO_status";
    pub const PLT: &str = "PLT_status";
}

/// The complete rule-evaluation outcome for one patient record.
///
/// Fixed-shape: every category is a typed field rather than a dynamic map.
/// EOS and MONO carry tagged presence — `None` means the triggering condition
/// did not hold and no indicator column is produced for that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabelSet {
    pub hct: HctStatus,
    pub mcv: McvStatus,
    pub wbc: WbcStatus,
    pub eos: Option<EosStatus>,
    pub mono: Option<MonoStatus>,
    pub plt: PltStatus,
}

impl StatusLabelSet {
    /// True when every tiered category is normal and neither optional flag
    /// is raised.
    pub fn is_unremarkable(&self) -> bool {
        self.hct == HctStatus::Normal
            && self.mcv == McvStatus::Normal
            && self.wbc == WbcStatus::Normal
            && self.eos.is_none()
            && self.mono.is_none()
            && self.plt == PltStatus::Normal
    }
}

impl fmt::Display for StatusLabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HCT={} MCV={} WBC={} PLT={}",
            self.hct.as_str(),
            self.mcv.as_str(),
            self.wbc.as_str(),
            self.plt.as_str()
        )?;
        if let Some(eos) = self.eos {
            write!(f, " EOS={}", eos.as_str())?;
        }
        if let Some(mono) = self.mono {
            write!(f, " MONO={}", mono.as_str())?;
        }
        Ok(())
    }
}
