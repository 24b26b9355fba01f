// plotmerge CLI - cemetery plot data batch tools

mod exit_codes;
mod merge;
mod upsert;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use exit_codes::{
    EXIT_DATABASE, EXIT_ERROR, EXIT_INPUT_MALFORMED, EXIT_INPUT_NOT_FOUND, EXIT_INVALID_CONFIG,
    EXIT_SUCCESS, EXIT_USAGE,
};
use plotmerge_merge::MergeError;
use plotmerge_store::StoreError;

#[derive(Parser)]
#[command(name = "plotmerge")]
#[command(about = "Merge cemetery plot spreadsheets into record JSON")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge plot data from a CSV spreadsheet into a JSON record file
    #[command(after_help = "\
Records whose Plot Data is \"Plot info goes here.\" are never changed.
No output is written if either input is missing or malformed.

Examples:
  plotmerge merge -j records.json -c plots.csv -o merged.json
  plotmerge merge --json_input records.json --csv_input plots.csv --output merged.json
  plotmerge merge -j records.json -c plots.csv -o merged.json --config plots.toml
  plotmerge merge -j records.json -c plots.csv -o merged.json --summary-json | jq .summary")]
    Merge {
        /// Path to the input JSON file
        #[arg(short = 'j', long = "json-input", visible_alias = "json_input")]
        json_input: PathBuf,

        /// Path to the input CSV file
        #[arg(short = 'c', long = "csv-input", visible_alias = "csv_input")]
        csv_input: PathBuf,

        /// Path for the output (merged) JSON file
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// TOML file overriding stop words, column names, and field names
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the run summary as JSON instead of the human report
        #[arg(long)]
        summary_json: bool,
    },

    /// Show the surname candidates extracted from record headers
    #[command(after_help = "\
Examples:
  plotmerge names 'Harris & Putnam' 'D. Batchelor' 'Carter Family Bench'")]
    Names {
        /// Header text, one argument per header
        #[arg(required = true)]
        headers: Vec<String>,

        /// TOML file overriding the stop-word list
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Update or insert page metadata into a SQLite table
    #[command(after_help = "\
Rows are keyed by source_page. The batch runs in one transaction.

Examples:
  plotmerge upsert metadata.json --db cemetery.sqlite")]
    Upsert {
        /// Page metadata JSON (array of objects)
        input: PathBuf,

        /// SQLite database file (created if missing)
        #[arg(long)]
        db: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default merge configuration as TOML
    Config,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            eprintln!("Usage: plotmerge <command> [options]");
            eprintln!("       plotmerge --help for more information");
            Err(CliError::args(""))
        }
        Some(Commands::Merge {
            json_input,
            csv_input,
            output,
            config,
            summary_json,
        }) => merge::cmd_merge(json_input, csv_input, output, config, summary_json),
        Some(Commands::Names { headers, config }) => merge::cmd_names(headers, config),
        Some(Commands::Upsert { input, db, json }) => upsert::cmd_upsert(input, db, json),
        Some(Commands::Config) => merge::cmd_config(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `info` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<MergeError> for CliError {
    fn from(err: MergeError) -> Self {
        let code = match &err {
            MergeError::InputNotFound { .. } => EXIT_INPUT_NOT_FOUND,
            MergeError::InputMalformed { .. } => EXIT_INPUT_MALFORMED,
            MergeError::ConfigParse(_) | MergeError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
            MergeError::Io(_) => EXIT_ERROR,
        };
        let error = Self { code, message: err.to_string(), hint: None };
        match err {
            MergeError::ConfigParse(_) | MergeError::ConfigValidation(_) => {
                error.with_hint("run `plotmerge config` for a template with every key")
            }
            _ => error,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let code = match &err {
            StoreError::InvalidInput(_) => EXIT_INPUT_MALFORMED,
            StoreError::Sqlite(_) => EXIT_DATABASE,
        };
        Self { code, message: err.to_string(), hint: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_carry_hint() {
        let err = CliError::from(MergeError::ConfigParse("bad".into()));
        assert_eq!(err.code, EXIT_INVALID_CONFIG);
        assert!(err.hint.is_some());
    }

    #[test]
    fn io_errors_have_no_config_hint() {
        let err = CliError::from(MergeError::Io("cannot render config: x".into()));
        assert_eq!(err.code, EXIT_ERROR);
        assert!(err.hint.is_none());
    }
}
