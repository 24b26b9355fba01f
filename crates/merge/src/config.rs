use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::MergeError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Marker placed in `Plot Data` by hand when a record was completed manually.
pub const DEFAULT_SENTINEL: &str = "Plot info goes here.";

/// Structural words and stray numerals/abbreviations seen in record headers.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "family", "bench", "of", "and", "or", "2", "0", "1", "14", "21", "pg", "right", "l.c.r.",
];

/// The plot spreadsheet's last-name header ships with a trailing space; the
/// padded variant is tried first.
pub const DEFAULT_LAST_NAME_COLUMNS: &[&str] = &["LAST NAME ", "LAST NAME"];

pub const DEFAULT_PLOT_NUMBER_COLUMNS: &[&str] = &["BLOCK", "LOT #"];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Record field holding the free-text header.
    pub header_field: String,
    pub plot_number_field: String,
    pub plot_data_field: String,
    /// Records whose plot-data field equals this are never modified.
    pub sentinel: String,
    /// Candidate names for the last-name column, first present wins.
    pub last_name_columns: Vec<String>,
    /// Columns concatenated (no separator) into the plot number.
    pub plot_number_columns: Vec<String>,
    pub plot_data_separator: String,
    pub stop_words: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            header_field: "Header".into(),
            plot_number_field: "Plot Number".into(),
            plot_data_field: "Plot Data".into(),
            sentinel: DEFAULT_SENTINEL.into(),
            last_name_columns: to_strings(DEFAULT_LAST_NAME_COLUMNS),
            plot_number_columns: to_strings(DEFAULT_PLOT_NUMBER_COLUMNS),
            plot_data_separator: " | ".into(),
            stop_words: to_strings(DEFAULT_STOP_WORDS),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MergeConfig {
    pub fn from_toml(input: &str) -> Result<Self, MergeError> {
        let config: MergeConfig =
            toml::from_str(input).map_err(|e| MergeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, MergeError> {
        toml::to_string_pretty(self)
            .map_err(|e| MergeError::Io(format!("cannot render config: {e}")))
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        let fields = [
            ("header_field", &self.header_field),
            ("plot_number_field", &self.plot_number_field),
            ("plot_data_field", &self.plot_data_field),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(MergeError::ConfigValidation(format!("{name} must not be empty")));
            }
        }

        if self.plot_number_field == self.plot_data_field {
            return Err(MergeError::ConfigValidation(
                "plot_number_field and plot_data_field must differ".into(),
            ));
        }

        if self.last_name_columns.is_empty() {
            return Err(MergeError::ConfigValidation(
                "at least one last_name_columns entry is required".into(),
            ));
        }

        if self.plot_number_columns.is_empty() {
            return Err(MergeError::ConfigValidation(
                "at least one plot_number_columns entry is required".into(),
            ));
        }

        Ok(())
    }

    /// Lowercased stop words for case-insensitive membership checks.
    pub fn stop_word_set(&self) -> HashSet<String> {
        self.stop_words.iter().map(|w| w.to_lowercase()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
