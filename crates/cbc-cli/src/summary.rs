//! Result tables for the terminal.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cbc_infer::BatchPrediction;
use cbc_model::{CONDITION_LABELS, PredictionResult, StatusLabelSet};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

/// Human-readable condition name from a flag label
/// (`is_microcytic_rbc` -> "Microcytic Rbc").
fn condition_name(label: &str) -> String {
    label
        .trim_start_matches("is_")
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print the rule-evaluation statuses for one record.
pub fn print_status_table(labels: &StatusLabelSet) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Status")]);
    apply_table_style(&mut table);
    let status_cell = |text: &str| {
        if text == "normal" {
            Cell::new(text).fg(Color::Green)
        } else {
            Cell::new(text).fg(Color::Yellow)
        }
    };
    table.add_row(vec![Cell::new("HCT"), status_cell(labels.hct.as_str())]);
    table.add_row(vec![Cell::new("MCV"), status_cell(labels.mcv.as_str())]);
    table.add_row(vec![Cell::new("WBC"), status_cell(labels.wbc.as_str())]);
    if let Some(eos) = labels.eos {
        table.add_row(vec![Cell::new("EOS"), status_cell(eos.as_str())]);
    }
    if let Some(mono) = labels.mono {
        table.add_row(vec![Cell::new("MONO"), status_cell(mono.as_str())]);
    }
    table.add_row(vec![Cell::new("PLT"), status_cell(labels.plt.as_str())]);
    println!("{table}");
}

/// Print the six condition flags for one record.
pub fn print_prediction_table(prediction: &PredictionResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Condition"), header_cell("Flag")]);
    apply_table_style(&mut table);
    table
        .column_mut(1)
        .expect("flag column")
        .set_cell_alignment(CellAlignment::Center);
    for (label, value) in prediction.flags() {
        let flag = if value == 1 {
            Cell::new("POSITIVE").fg(Color::Red)
        } else {
            Cell::new("-").fg(Color::Green)
        };
        table.add_row(vec![Cell::new(condition_name(label)), flag]);
    }
    println!("{table}");
    if prediction.positive_count() == 0 {
        println!("No conditions flagged.");
    } else {
        println!("{} condition(s) flagged.", prediction.positive_count());
    }
}

/// Print per-condition positive counts for a batch, plus row totals.
pub fn print_batch_summary(outcomes: &[BatchPrediction]) {
    let mut positives = [0usize; 6];
    let mut screened = 0usize;
    let mut rejected = 0usize;
    for outcome in outcomes {
        match &outcome.outcome {
            Ok(prediction) => {
                screened += 1;
                for (index, (_, value)) in prediction.flags().iter().enumerate() {
                    positives[index] += usize::from(*value);
                }
            }
            Err(_) => rejected += 1,
        }
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Condition"), header_cell("Positive")]);
    apply_table_style(&mut table);
    table
        .column_mut(1)
        .expect("count column")
        .set_cell_alignment(CellAlignment::Right);
    for (label, count) in CONDITION_LABELS.iter().zip(positives) {
        let cell = if count > 0 {
            Cell::new(count).fg(Color::Red)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(condition_name(label)), cell]);
    }
    println!("{table}");
    println!("Screened {screened} of {} rows.", outcomes.len());
    if rejected > 0 {
        eprintln!("Rejected rows:");
        for outcome in outcomes {
            if let Err(error) = &outcome.outcome {
                eprintln!("- {error}");
            }
        }
    }
}
