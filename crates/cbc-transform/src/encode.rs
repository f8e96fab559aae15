//! One-hot expansion of rule-evaluation labels.
//!
//! Each produced column name is the category key joined to the label text
//! with an underscore, e.g. `HCT_status_moderate anemia`. Only the columns
//! that are 1 for the record are emitted; zero fill against the full trained
//! schema happens during assembly.

use cbc_model::StatusLabelSet;
use cbc_model::status::category;

/// Build an indicator column name from a category key and label text.
pub fn indicator_name(category: &str, label: &str) -> String {
    format!("{category}_{label}")
}

/// The one-hot indicator columns set to 1 for this label set.
///
/// Absent EOS/MONO flags contribute no column at all; the assembler's
/// schema reindex fills those with 0.
pub fn indicator_columns(labels: &StatusLabelSet) -> Vec<String> {
    let mut columns = Vec::with_capacity(6);
    columns.push(indicator_name(category::HCT, labels.hct.as_str()));
    columns.push(indicator_name(category::MCV, labels.mcv.as_str()));
    columns.push(indicator_name(category::WBC, labels.wbc.as_str()));
    if let Some(eos) = labels.eos {
        columns.push(indicator_name(category::EOS, eos.as_str()));
    }
    if let Some(mono) = labels.mono {
        columns.push(indicator_name(category::MONO, mono.as_str()));
    }
    columns.push(indicator_name(category::PLT, labels.plt.as_str()));
    columns
}
