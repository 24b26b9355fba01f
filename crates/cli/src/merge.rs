//! `plotmerge merge`, `plotmerge names`, `plotmerge config`.

use std::path::{Path, PathBuf};

use plotmerge_merge::engine::{parse_records, read_input, render_records};
use plotmerge_merge::extract::extract_key_names_with;
use plotmerge_merge::{MergeConfig, MergeError};
use tracing::info;

use crate::CliError;

/// Defaults unless a `--config` file was given. An unreadable config file is
/// a config error, not an input error.
fn load_config(path: Option<&Path>) -> Result<MergeConfig, CliError> {
    let Some(path) = path else {
        return Ok(MergeConfig::default());
    };
    let text = read_input(path).map_err(|e| match e {
        MergeError::InputNotFound { .. } | MergeError::InputMalformed { .. } => {
            MergeError::ConfigParse(e.to_string())
        }
        other => other,
    })?;
    Ok(MergeConfig::from_toml(&text)?)
}

pub fn cmd_merge(
    json_input: PathBuf,
    csv_input: PathBuf,
    output: PathBuf,
    config_path: Option<PathBuf>,
    summary_json: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    if let Some(path) = &config_path {
        info!(path = %path.display(), "loaded merge config");
    }

    // JSON is read and parsed before the CSV is touched.
    let json_data = read_input(&json_input)?;
    let records = parse_records(&json_data, &json_input.display().to_string())?;
    let csv_data = read_input(&csv_input)?;

    let result = plotmerge_merge::run(
        &config,
        records,
        &csv_data,
        &csv_input.display().to_string(),
    )?;

    let rendered = render_records(&result.records)?;
    std::fs::write(&output, rendered)
        .map_err(|e| CliError::io(format!("cannot write {}: {e}", output.display())))?;
    info!(path = %output.display(), "wrote merged records");

    if summary_json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    } else {
        println!("Merge complete. {} records were updated.", result.summary.matched);
        println!("The final merged data has been saved to '{}'.", output.display());
    }

    Ok(())
}

pub fn cmd_names(headers: Vec<String>, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let stop_words = config.stop_word_set();

    for header in &headers {
        let names = extract_key_names_with(header, &stop_words);
        if names.is_empty() {
            println!("{header}\t(none)");
        } else {
            println!("{header}\t{}", names.join(", "));
        }
    }

    Ok(())
}

pub fn cmd_config() -> Result<(), CliError> {
    let text = MergeConfig::default().to_toml()?;
    print!("{text}");
    Ok(())
}
