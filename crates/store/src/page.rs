use serde_json::{Map, Value};
use tracing::warn;

use crate::error::StoreError;

/// One page of extracted cemetery metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRecord {
    pub source_page: String,
    pub extracted_image: Option<String>,
    /// Arbitrary JSON, stored as text.
    pub image_bounding_box: Option<Value>,
    pub page_header: Option<String>,
    pub page_footer: Option<String>,
    pub page_location: Option<String>,
    pub page_additional_info: Option<String>,
    pub image_caption: Option<String>,
}

impl PageRecord {
    /// Bounding box as stored in the table; absent boxes become `null`.
    pub fn bounding_box_text(&self) -> String {
        self.image_bounding_box
            .as_ref()
            .unwrap_or(&Value::Null)
            .to_string()
    }
}

#[derive(Debug, Default)]
pub struct ParsedPages {
    pub pages: Vec<PageRecord>,
    /// Entries without a string `source_page`.
    pub skipped: usize,
}

/// Parse the metadata JSON array. Entries lacking a key are skipped.
pub fn parse_pages(json_data: &str) -> Result<ParsedPages, StoreError> {
    let value: Value =
        serde_json::from_str(json_data).map_err(|e| StoreError::InvalidInput(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(StoreError::InvalidInput("top-level value must be an array".into()));
    };

    let mut parsed = ParsedPages::default();
    for (i, item) in items.into_iter().enumerate() {
        let Value::Object(obj) = item else {
            return Err(StoreError::InvalidInput(format!("element {i} is not an object")));
        };

        let Some(source_page) = obj.get("source_page").and_then(Value::as_str) else {
            warn!(index = i, "page without source_page, skipping");
            parsed.skipped += 1;
            continue;
        };

        parsed.pages.push(PageRecord {
            source_page: source_page.to_string(),
            extracted_image: text_field(&obj, "extracted_image"),
            image_bounding_box: obj.get("image_bounding_box").cloned(),
            page_header: text_field(&obj, "page_header"),
            page_footer: text_field(&obj, "page_footer"),
            page_location: text_field(&obj, "page_location"),
            page_additional_info: text_field(&obj, "page_additional_info"),
            image_caption: text_field(&obj, "image_caption"),
        });
    }

    Ok(parsed)
}

/// Strings as-is, null/missing as `None`, anything else as its JSON text.
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
