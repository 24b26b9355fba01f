use serde_json::Value;
use tracing::debug;

use crate::config::MergeConfig;
use crate::extract::extract_key_names_with;
use crate::model::{LookupTable, MergeSummary, Record, SpreadsheetRow};

/// Merge spreadsheet data into every matching record, in input order.
///
/// Records carrying the sentinel are left alone. For the rest, header
/// candidates are tried in order and the first one found in `table` wins.
pub fn merge_records(
    records: &mut [Record],
    table: &LookupTable,
    config: &MergeConfig,
) -> MergeSummary {
    let stop_words = config.stop_word_set();
    let mut summary = MergeSummary {
        records: records.len(),
        lookup_size: table.len(),
        ..MergeSummary::default()
    };

    for record in records.iter_mut() {
        if is_protected(record, config) {
            summary.protected += 1;
            continue;
        }

        let header = record
            .get(&config.header_field)
            .and_then(Value::as_str)
            .unwrap_or("");

        let hit = extract_key_names_with(header, &stop_words)
            .into_iter()
            .find_map(|name| table.get(&name).map(|row| (name, row)));

        match hit {
            Some((name, row)) => {
                debug!(header, name = %name, "matched record");
                apply_row(record, row, config);
                summary.matched += 1;
            }
            None => summary.unmatched += 1,
        }
    }

    summary
}

/// True when the plot-data field holds the manual-entry sentinel.
pub fn is_protected(record: &Record, config: &MergeConfig) -> bool {
    record.get(&config.plot_data_field).and_then(Value::as_str) == Some(config.sentinel.as_str())
}

/// Overwrite the plot number and plot data of `record` from `row`.
pub fn apply_row(record: &mut Record, row: &SpreadsheetRow, config: &MergeConfig) {
    record.insert(
        config.plot_number_field.clone(),
        Value::String(plot_number(row, config)),
    );
    record.insert(
        config.plot_data_field.clone(),
        Value::String(plot_data(row, config)),
    );
}

/// Configured columns concatenated without separator, trimmed.
pub fn plot_number(row: &SpreadsheetRow, config: &MergeConfig) -> String {
    let joined: String = config
        .plot_number_columns
        .iter()
        .map(|col| row.get(col).unwrap_or(""))
        .collect();
    joined.trim().to_string()
}

/// `column: value` for every non-blank cell, in column order.
pub fn plot_data(row: &SpreadsheetRow, config: &MergeConfig) -> String {
    row.fields
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(column, value)| format!("{}: {}", column.trim(), value.trim()))
        .collect::<Vec<_>>()
        .join(&config.plot_data_separator)
}
