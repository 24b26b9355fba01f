// SQLite page metadata table

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::page::PageRecord;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cemetery_records (
    source_page TEXT PRIMARY KEY NOT NULL,
    extracted_image TEXT,
    image_bounding_box TEXT,      -- JSON text, 'null' when absent
    page_header TEXT,
    page_footer TEXT,
    page_location TEXT,
    page_additional_info TEXT,
    image_caption TEXT
);
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
}

/// Open (or create) the database and ensure the table exists.
pub fn open(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

/// Update rows whose `source_page` exists, insert the rest.
///
/// Runs in a single transaction; on error nothing is committed.
pub fn upsert_pages(conn: &mut Connection, pages: &[PageRecord]) -> Result<UpsertSummary, StoreError> {
    let tx = conn.transaction()?;
    let mut summary = UpsertSummary::default();

    {
        let mut exists = tx.prepare("SELECT 1 FROM cemetery_records WHERE source_page = ?1")?;
        let mut update = tx.prepare(
            "UPDATE cemetery_records SET extracted_image = ?1, image_bounding_box = ?2, page_header = ?3, page_footer = ?4, page_location = ?5, page_additional_info = ?6, image_caption = ?7 WHERE source_page = ?8",
        )?;
        let mut insert = tx.prepare(
            "INSERT INTO cemetery_records (source_page, extracted_image, image_bounding_box, page_header, page_footer, page_location, page_additional_info, image_caption) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;

        for page in pages {
            let found = exists
                .query_row(params![page.source_page], |_| Ok(()))
                .optional()?
                .is_some();

            if found {
                update.execute(params![
                    page.extracted_image,
                    page.bounding_box_text(),
                    page.page_header,
                    page.page_footer,
                    page.page_location,
                    page.page_additional_info,
                    page.image_caption,
                    page.source_page,
                ])?;
                summary.updated += 1;
                debug!(source_page = %page.source_page, "updated record");
            } else {
                insert.execute(params![
                    page.source_page,
                    page.extracted_image,
                    page.bounding_box_text(),
                    page.page_header,
                    page.page_footer,
                    page.page_location,
                    page.page_additional_info,
                    page.image_caption,
                ])?;
                summary.inserted += 1;
                debug!(source_page = %page.source_page, "inserted record");
            }
        }
    }

    tx.commit()?;
    info!(inserted = summary.inserted, updated = summary.updated, "upsert committed");
    Ok(summary)
}

/// Read one page back by key.
pub fn load_page(conn: &Connection, source_page: &str) -> Result<Option<PageRecord>, StoreError> {
    let page = conn
        .query_row(
            "SELECT source_page, extracted_image, image_bounding_box, page_header, page_footer, page_location, page_additional_info, image_caption FROM cemetery_records WHERE source_page = ?1",
            params![source_page],
            |row| {
                let bbox: Option<String> = row.get(2)?;
                Ok(PageRecord {
                    source_page: row.get(0)?,
                    extracted_image: row.get(1)?,
                    image_bounding_box: bbox
                        .and_then(|text| serde_json::from_str(&text).ok())
                        .filter(|v: &serde_json::Value| !v.is_null()),
                    page_header: row.get(3)?,
                    page_footer: row.get(4)?,
                    page_location: row.get(5)?,
                    page_additional_info: row.get(6)?,
                    image_caption: row.get(7)?,
                })
            },
        )
        .optional()?;
    Ok(page)
}
