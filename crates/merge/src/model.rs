use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A cemetery record as read from the JSON array. Key order is preserved.
pub type Record = Map<String, Value>;

/// One CSV row as (column, value) pairs in the file's column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetRow {
    pub fields: Vec<(String, String)>,
}

impl SpreadsheetRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value of `column`, matched exactly against the header text.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// True when every field is the empty string.
    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Spreadsheet rows keyed by lowercase surname.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    rows: HashMap<String, SpreadsheetRow>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the lowercased name. Returns the row it replaced, if any.
    pub fn insert(&mut self, name: &str, row: SpreadsheetRow) -> Option<SpreadsheetRow> {
        self.rows.insert(name.to_lowercase(), row)
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&SpreadsheetRow> {
        self.rows.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// Records in the input array.
    pub records: usize,
    /// Records updated from the spreadsheet (the match counter).
    pub matched: usize,
    /// Records skipped because they carry the sentinel.
    pub protected: usize,
    pub unmatched: usize,
    /// Distinct surnames in the lookup table.
    pub lookup_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeResult {
    pub meta: MergeMeta,
    pub summary: MergeSummary,
    #[serde(skip)]
    pub records: Vec<Record>,
}
