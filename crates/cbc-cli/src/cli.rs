//! CLI argument definitions for the screening front end.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cbc-screen",
    version,
    about = "CBC Screening - rule-based indicators and hybrid model predictions",
    long_about = "Screen complete blood count (CBC) panels for six conditions:\n\
                  anemia, thalassemia suspicion, microcytic red cells,\n\
                  infection/inflammation, allergy/parasite, and high lipids.\n\n\
                  Predictions come from a pre-trained tree ensemble and neural\n\
                  network; artifacts are loaded once at startup."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the serving artifacts (model_columns.json,
    /// scaler.json, tree_model.json, neural_model.json).
    #[arg(
        long = "artifacts",
        value_name = "DIR",
        default_value = "artifacts",
        global = true
    )]
    pub artifacts: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Screen a single patient record from a JSON file.
    Screen(ScreenArgs),

    /// Screen a CSV batch of panels with batch-median fill for missing values.
    Batch(BatchArgs),

    /// Print the expected feature columns in schema order.
    Columns,
}

#[derive(Parser)]
pub struct ScreenArgs {
    /// Path to a JSON patient record
    /// ({"sex": "Female", "age_y": 30, "HCT": 38.0, ...}).
    #[arg(value_name = "RECORD")]
    pub record: PathBuf,

    /// Print the raw response JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Path to a CSV file with a header row of panel columns.
    #[arg(value_name = "PANELS")]
    pub input: PathBuf,

    /// Write per-row predictions to this CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
