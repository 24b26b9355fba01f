//! `plotmerge-merge` — Surname matching engine for cemetery plot records.
//!
//! Engine crate: receives JSON records and CSV text, returns merged records
//! plus a summary. Apart from `engine::read_input`, no file access; output
//! writing and argument handling live in the CLI.

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod merger;
pub mod model;

pub use config::MergeConfig;
pub use engine::run;
pub use error::MergeError;
pub use extract::extract_key_names;
pub use lookup::build_lookup;
pub use merger::merge_records;
pub use model::{LookupTable, MergeResult, MergeSummary, SpreadsheetRow};
