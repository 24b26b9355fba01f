use tracing::debug;

use crate::config::MergeConfig;
use crate::model::{LookupTable, SpreadsheetRow};

/// Build the surname lookup from CSV text (first row = headers).
///
/// The last-name column is the first of `config.last_name_columns` found in
/// the header row. Blank rows and rows without a name are skipped; a later
/// row with the same lowercased name replaces an earlier one.
pub fn build_lookup(csv_data: &str, config: &MergeConfig) -> Result<LookupTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let name_idx = config
        .last_name_columns
        .iter()
        .find_map(|col| headers.iter().position(|h| h == col));
    if name_idx.is_none() {
        debug!(columns = ?config.last_name_columns, "no last-name column in CSV header");
    }

    let mut table = LookupTable::new();

    for record in reader.records() {
        let record = record?;

        // Short rows are padded; cells past the header width are dropped.
        let fields: Vec<(String, String)> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        let row = SpreadsheetRow::new(fields);

        if row.is_empty() {
            continue;
        }

        let last_name = name_idx
            .and_then(|i| record.get(i))
            .unwrap_or("")
            .trim();
        debug!(last_name, "checking spreadsheet row");

        if last_name.is_empty() {
            continue;
        }

        if table.insert(last_name, row).is_some() {
            debug!(last_name, "duplicate last name, keeping later row");
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(csv: &str) -> LookupTable {
        build_lookup(csv, &MergeConfig::default()).unwrap()
    }

    #[test]
    fn keys_are_lowercased_and_trimmed() {
        let table = build("LAST NAME,BLOCK,LOT #\n  Adams ,12,7\n");
        assert_eq!(table.len(), 1);
        let row = table.get("adams").unwrap();
        assert_eq!(row.get("LAST NAME"), Some("  Adams "));
        assert_eq!(row.get("BLOCK"), Some("12"));
    }

    #[test]
    fn trailing_space_header_preferred() {
        let table = build("LAST NAME ,LAST NAME,BLOCK\nAdams,Baker,1\n");
        assert!(table.get("adams").is_some());
        assert!(table.get("baker").is_none());
    }

    #[test]
    fn trailing_space_header_alone() {
        let table = build("LAST NAME ,BLOCK\nAdams,1\n");
        assert_eq!(table.get("ADAMS").and_then(|r| r.get("BLOCK")), Some("1"));
    }

    #[test]
    fn missing_name_column_yields_empty_table() {
        let table = build("SURNAME,BLOCK\nAdams,1\n");
        assert!(table.is_empty());
    }

    #[test]
    fn blank_rows_and_blank_names_skipped() {
        let table = build("LAST NAME,BLOCK\n,,\n,5\n   ,6\nCarter,7\n");
        assert_eq!(table.len(), 1);
        assert!(table.get("carter").is_some());
    }

    #[test]
    fn duplicate_names_last_row_wins() {
        let table = build("LAST NAME,BLOCK\nAdams,1\nADAMS,2\nadams,3\n");
        assert_eq!(table.len(), 1);
        let row = table.get("Adams").unwrap();
        assert_eq!(row.get("BLOCK"), Some("3"));
        assert_eq!(row.get("LAST NAME"), Some("adams"));
    }

    #[test]
    fn short_rows_are_padded() {
        let table = build("LAST NAME,BLOCK,LOT #\nAdams,12\n");
        let row = table.get("adams").unwrap();
        assert_eq!(row.fields.len(), 3);
        assert_eq!(row.get("LOT #"), Some(""));
    }

    #[test]
    fn long_rows_are_truncated() {
        let table = build("LAST NAME,BLOCK\nAdams,12,extra\n");
        assert_eq!(table.get("adams").unwrap().fields.len(), 2);
    }

    #[test]
    fn configured_name_column() {
        let config = MergeConfig {
            last_name_columns: vec!["Surname".into()],
            ..MergeConfig::default()
        };
        let table = build_lookup("Surname,Row\nEaton,4\n", &config).unwrap();
        assert!(table.get("EATON").is_some());
    }

    #[test]
    fn header_only_csv() {
        assert!(build("LAST NAME,BLOCK\n").is_empty());
        assert!(build("").is_empty());
    }
}
