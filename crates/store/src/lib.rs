//! `plotmerge-store` — Page metadata upsert into SQLite.
//!
//! Keeps a `cemetery_records` table in sync with the page metadata JSON the
//! extraction step produces, keyed by `source_page`.

pub mod error;
pub mod page;
pub mod upsert;

pub use error::StoreError;
pub use page::{parse_pages, PageRecord, ParsedPages};
pub use upsert::{load_page, open, upsert_pages, UpsertSummary};
