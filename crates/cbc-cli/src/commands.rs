use std::fs;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use cbc_infer::ArtifactSet;
use cbc_model::{PatientRecord, ScreenResponse};
use cbc_transform::evaluate;
use cbc_transform::schema::is_numeric_feature;

use cbc_cli::batch_io::{read_panels, write_predictions};
use crate::cli::{BatchArgs, ScreenArgs};
use crate::summary::{
    apply_table_style, print_batch_summary, print_prediction_table, print_status_table,
};

pub fn run_screen(artifacts: &ArtifactSet, args: &ScreenArgs) -> Result<()> {
    let span = info_span!("screen", record = %args.record.display());
    let _guard = span.enter();
    let text = fs::read_to_string(&args.record)
        .with_context(|| format!("read record {}", args.record.display()))?;
    let record: PatientRecord = serde_json::from_str(&text)
        .with_context(|| format!("parse record {}", args.record.display()))?;
    let predictions = artifacts.screen(&record).context("screen record")?;
    if args.json {
        let response = ScreenResponse { predictions };
        println!(
            "{}",
            serde_json::to_string_pretty(&response).context("serialize response")?
        );
    } else {
        print_status_table(&evaluate(&record));
        print_prediction_table(&predictions);
    }
    Ok(())
}

/// Returns the number of rows rejected during coercion.
pub fn run_batch(artifacts: &ArtifactSet, args: &BatchArgs) -> Result<usize> {
    let span = info_span!("batch", input = %args.input.display());
    let _guard = span.enter();
    let panels = read_panels(&args.input)?;
    let outcomes = artifacts.screen_batch(&panels).context("screen batch")?;
    if let Some(output) = &args.output {
        write_predictions(output, &outcomes)?;
    }
    print_batch_summary(&outcomes);
    let rejected = outcomes
        .iter()
        .filter(|outcome| outcome.outcome.is_err())
        .count();
    info!(
        rows = outcomes.len(),
        rejected, "batch screening complete"
    );
    Ok(rejected)
}

pub fn run_columns(artifacts: &ArtifactSet) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Column", "Scaled"]);
    apply_table_style(&mut table);
    for (position, name) in artifacts.schema().columns().iter().enumerate() {
        let scaled = if is_numeric_feature(name) { "yes" } else { "-" };
        table.add_row(vec![position.to_string(), name.clone(), scaled.to_string()]);
    }
    println!("{table}");
    Ok(())
}
