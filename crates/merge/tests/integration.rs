use std::path::PathBuf;

use plotmerge_merge::engine::{parse_records, read_input, render_records, run};
use plotmerge_merge::{MergeConfig, MergeError, MergeResult};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn run_fixtures(config: &MergeConfig) -> MergeResult {
    let dir = fixtures_dir();
    let json = read_input(&dir.join("records.json")).unwrap();
    let records = parse_records(&json, "records.json").unwrap();
    let csv = read_input(&dir.join("plots.csv")).unwrap();
    run(config, records, &csv, "plots.csv").unwrap()
}

// -------------------------------------------------------------------------
// Fixture merge
// -------------------------------------------------------------------------

#[test]
fn fixture_summary() {
    let result = run_fixtures(&MergeConfig::default());

    assert_eq!(result.summary.records, 6);
    assert_eq!(result.summary.matched, 4);
    assert_eq!(result.summary.protected, 1);
    assert_eq!(result.summary.unmatched, 1);
    // adams, putnam, batchelor, carter, fowler
    assert_eq!(result.summary.lookup_size, 5);
}

#[test]
fn fixture_single_surname() {
    let result = run_fixtures(&MergeConfig::default());
    let adams = &result.records[0];

    assert_eq!(adams["Plot Number"], "127");
    assert_eq!(
        adams["Plot Data"],
        "LAST NAME: Adams | FIRST NAME: John | BLOCK: 12 | LOT #: 7"
    );
    assert_eq!(adams["Page"], 1);
}

#[test]
fn fixture_second_candidate_matches() {
    let result = run_fixtures(&MergeConfig::default());
    let record = &result.records[1];

    // Harris is not in the sheet, Putnam is.
    assert_eq!(record["Plot Number"], "314");
    assert_eq!(
        record["Plot Data"],
        "LAST NAME: Putnam | FIRST NAME: Ruth | BLOCK: 3 | LOT #: 14 | NOTES: Granite marker"
    );
}

#[test]
fn fixture_duplicate_surname_uses_last_row() {
    let result = run_fixtures(&MergeConfig::default());
    let record = &result.records[2];

    assert_eq!(record["Plot Number"], "B4");
    assert_eq!(
        record["Plot Data"],
        "LAST NAME: batchelor | FIRST NAME: Dora | BLOCK: B | LOT #: 4 | NOTES: Replaced stone"
    );
}

#[test]
fn fixture_sentinel_record_is_byte_identical() {
    let dir = fixtures_dir();
    let original = parse_records(&read_input(&dir.join("records.json")).unwrap(), "records.json")
        .unwrap();
    let result = run_fixtures(&MergeConfig::default());

    assert_eq!(result.records[3], original[3]);
    assert_eq!(
        serde_json::to_string(&result.records[3]).unwrap(),
        serde_json::to_string(&original[3]).unwrap()
    );
    // Unmatched records pass through as well.
    assert_eq!(result.records[4], original[4]);
}

#[test]
fn fixture_comma_header_adds_missing_fields() {
    let result = run_fixtures(&MergeConfig::default());
    let record = &result.records[5];

    assert_eq!(record["Plot Number"], "5");
    assert_eq!(
        record["Plot Data"],
        "LAST NAME: Fowler | FIRST NAME: Grace | BLOCK: 5 | NOTES: Unmarked"
    );
    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Header", "Page", "Plot Number", "Plot Data"]);
}

#[test]
fn fixture_rendered_output_reparses() {
    let result = run_fixtures(&MergeConfig::default());
    let text = render_records(&result.records).unwrap();
    assert!(text.starts_with("[\n  {\n    \"Header\": \"Adams\""));

    let reparsed = parse_records(&text, "out.json").unwrap();
    assert_eq!(reparsed, result.records);
}

#[test]
fn config_override_changes_plot_number() {
    let config = MergeConfig::from_toml(
        r#"
plot_number_columns = ["LOT #", "BLOCK"]
plot_data_separator = "; "
"#,
    )
    .unwrap();
    let result = run_fixtures(&config);

    assert_eq!(result.records[0]["Plot Number"], "712");
    assert_eq!(
        result.records[0]["Plot Data"],
        "LAST NAME: Adams; FIRST NAME: John; BLOCK: 12; LOT #: 7"
    );
}

#[test]
fn missing_input_is_not_found() {
    let err = read_input(&fixtures_dir().join("absent.json")).unwrap_err();
    match err {
        MergeError::InputNotFound { path } => assert!(path.ends_with("absent.json")),
        other => panic!("unexpected error: {other}"),
    }
}
