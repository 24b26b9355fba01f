use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::config::MergeConfig;
use crate::error::MergeError;
use crate::lookup::build_lookup;
use crate::merger::merge_records;
use crate::model::{MergeMeta, MergeResult, Record};

/// Merge CSV plot data into parsed records.
///
/// `csv_path` is only used to label errors. Nothing is returned unless the
/// CSV parses.
pub fn run(
    config: &MergeConfig,
    mut records: Vec<Record>,
    csv_data: &str,
    csv_path: &str,
) -> Result<MergeResult, MergeError> {
    let table = build_lookup(csv_data, config)
        .map_err(|e| MergeError::malformed(csv_path, e.to_string()))?;
    info!(records = records.len(), surnames = table.len(), "inputs loaded");

    let summary = merge_records(&mut records, &table, config);
    info!(
        matched = summary.matched,
        protected = summary.protected,
        unmatched = summary.unmatched,
        "merge finished"
    );

    Ok(MergeResult {
        meta: MergeMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        records,
    })
}

/// Parse a JSON array of record objects.
pub fn parse_records(json_data: &str, path: &str) -> Result<Vec<Record>, MergeError> {
    let value: Value =
        serde_json::from_str(json_data).map_err(|e| MergeError::malformed(path, e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(MergeError::malformed(path, "top-level value must be an array"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(MergeError::malformed(path, format!("element {i} is not an object"))),
        })
        .collect()
}

/// Serialize records as a pretty (2-space) JSON array.
pub fn render_records(records: &[Record]) -> Result<String, MergeError> {
    serde_json::to_string_pretty(records)
        .map_err(|e| MergeError::Io(format!("JSON serialization error: {e}")))
}

/// Read a UTF-8 input file, separating "missing" from other failures.
pub fn read_input(path: &Path) -> Result<String, MergeError> {
    let display = path.display().to_string();
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8(bytes)
            .map_err(|e| MergeError::malformed(display, format!("not UTF-8: {e}"))),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(MergeError::InputNotFound { path: display }),
        Err(e) => Err(MergeError::Io(format!("cannot read {display}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_single_match() {
        let records = parse_records(r#"[{"Header": "Adams", "Plot Data": ""}]"#, "in.json").unwrap();
        let csv = "LAST NAME,BLOCK,LOT #\nAdams,12,7\n";
        let result = run(&MergeConfig::default(), records, csv, "in.csv").unwrap();

        assert_eq!(result.summary.matched, 1);
        assert_eq!(result.records[0]["Plot Number"], "127");
        assert_eq!(
            result.records[0]["Plot Data"],
            "LAST NAME: Adams | BLOCK: 12 | LOT #: 7"
        );
        assert_eq!(result.meta.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn empty_array() {
        let records = parse_records("[]", "in.json").unwrap();
        let result = run(&MergeConfig::default(), records, "LAST NAME\n", "in.csv").unwrap();
        assert_eq!(result.summary.matched, 0);
        assert_eq!(result.summary.records, 0);
        assert_eq!(render_records(&result.records).unwrap(), "[]");
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_records("[{", "bad.json").unwrap_err();
        match err {
            MergeError::InputMalformed { path, .. } => assert_eq!(path, "bad.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_array_is_malformed() {
        let err = parse_records(r#"{"Header": "Adams"}"#, "obj.json").unwrap_err();
        assert!(err.to_string().contains("must be an array"));
    }

    #[test]
    fn non_object_element_is_malformed() {
        let err = parse_records(r#"[{"Header": "Adams"}, 3]"#, "mixed.json").unwrap_err();
        assert!(err.to_string().contains("element 1"));
    }

    #[test]
    fn render_uses_two_space_indent() {
        let records = parse_records(r#"[{"Header":"A","Plot Data":"x"}]"#, "in.json").unwrap();
        let text = render_records(&records).unwrap();
        assert_eq!(text, "[\n  {\n    \"Header\": \"A\",\n    \"Plot Data\": \"x\"\n  }\n]");
    }

    #[test]
    fn protected_record_keeps_number_text() {
        let input = "[\n  {\n    \"Header\": \"Adams\",\n    \"Id\": 123456789012345678901234,\n    \"Plot Data\": \"Plot info goes here.\"\n  }\n]";
        let records = parse_records(input, "in.json").unwrap();
        let csv = "LAST NAME,BLOCK,LOT #\nAdams,12,7\n";
        let result = run(&MergeConfig::default(), records, csv, "in.csv").unwrap();

        assert_eq!(result.summary.protected, 1);
        assert_eq!(render_records(&result.records).unwrap(), input);
    }

    #[test]
    fn read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MergeError::InputNotFound { .. }));
    }

    #[test]
    fn read_input_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        std::fs::write(&path, b"LAST NAME\nM\xfcller\n").unwrap();
        let err = read_input(&path).unwrap_err();
        assert!(matches!(err, MergeError::InputMalformed { .. }));
    }
}
