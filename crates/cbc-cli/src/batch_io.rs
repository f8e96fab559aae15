//! CSV input/output for batch screening.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use cbc_infer::BatchPrediction;
use cbc_model::CONDITION_LABELS;
use cbc_transform::RawPanel;

/// Read a batch of raw panels from a CSV file with a header row.
///
/// Columns are matched by header name (`sex`, `age_y`, `HCT`, `MCV`, `WBC`,
/// `NEUTROPHILE`, `EOSINOPHILE`, `MONOCYTE`, `PLT_COUNT`); order does not
/// matter and unknown columns are ignored. Values stay as text here —
/// numeric coercion and median fill happen in the transform pipeline.
pub fn read_panels(path: &Path) -> Result<Vec<RawPanel>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open batch file {}", path.display()))?;
    let mut panels = Vec::new();
    for (row, result) in reader.deserialize::<RawPanel>().enumerate() {
        let panel = result.with_context(|| format!("read batch row {row}"))?;
        panels.push(panel);
    }
    info!(rows = panels.len(), file = %path.display(), "read batch input");
    Ok(panels)
}

/// Write batch predictions to CSV: one row per input row, the six condition
/// flags, and an error column for rows rejected during coercion.
pub fn write_predictions(path: &Path, outcomes: &[BatchPrediction]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create output file {}", path.display()))?;
    let mut header = vec!["row"];
    header.extend(CONDITION_LABELS);
    header.push("error");
    writer.write_record(&header).context("write header")?;
    for outcome in outcomes {
        let mut record = vec![outcome.row.to_string()];
        match &outcome.outcome {
            Ok(prediction) => {
                for (_, value) in prediction.flags() {
                    record.push(value.to_string());
                }
                record.push(String::new());
            }
            Err(error) => {
                record.extend(std::iter::repeat_n(String::new(), CONDITION_LABELS.len()));
                record.push(error.message.clone());
            }
        }
        writer
            .write_record(&record)
            .with_context(|| format!("write output row {}", outcome.row))?;
    }
    writer.flush().context("flush output")?;
    info!(rows = outcomes.len(), file = %path.display(), "wrote predictions");
    Ok(())
}
