//! Journal entry commands and queries.
//!
//! Commands own the transaction boundary and delegate tag and image list
//! reconciliation to [`tags`] and [`images`], which only ever run against the
//! connection of an already open transaction.

pub mod commands;
pub mod images;
pub mod queries;
pub mod tags;
pub mod view;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::AppError;
use crate::models::ListUpdate;

pub use images::ImageInput;
pub use view::{EntryView, ImageView};

const MAX_TITLE_LEN: usize = 500;

/// Body of a create or update request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    pub title: String,
    pub content: String,
    #[serde(deserialize_with = "deserialize_entry_date")]
    pub entry_date: NaiveDate,
    #[serde(default)]
    pub images: ListUpdate<ImageInput>,
    #[serde(default)]
    pub tags: ListUpdate<String>,
}

impl EntryInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::Validation(format!(
                "Title must be under {MAX_TITLE_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Calendar day (in UTC) of a client-supplied entry date.
///
/// Accepts an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// timestamp (taken as UTC) or a bare `YYYY-MM-DD` date.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn deserialize_entry_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_entry_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid entryDate `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn entry_date_formats() {
        assert_eq!(parse_entry_date("2025-06-15"), Some(date(2025, 6, 15)));
        assert_eq!(parse_entry_date("2025-06-15T18:30:00Z"), Some(date(2025, 6, 15)));
        assert_eq!(parse_entry_date("2025-06-15T18:30:00.123Z"), Some(date(2025, 6, 15)));
        assert_eq!(parse_entry_date("2025-06-15T18:30:00"), Some(date(2025, 6, 15)));
        assert_eq!(parse_entry_date("not a date"), None);
    }

    #[test]
    fn entry_date_is_normalized_to_the_utc_day() {
        // 23:30 at UTC-02:00 is already the next day in UTC.
        assert_eq!(
            parse_entry_date("2025-06-15T23:30:00-02:00"),
            Some(date(2025, 6, 16))
        );
    }

    #[test]
    fn deserializes_camel_case_body() {
        let input: EntryInput = serde_json::from_str(
            r#"{"title": "Day one", "content": "<p>hi</p>", "entryDate": "2025-06-15", "tags": ["a"]}"#,
        )
        .unwrap();
        assert_eq!(input.entry_date, date(2025, 6, 15));
        assert_eq!(input.tags, ListUpdate::Set(vec!["a".to_string()]));
        assert!(input.images.is_unset());
    }

    #[test]
    fn missing_required_field_fails_to_deserialize() {
        let result = serde_json::from_str::<EntryInput>(r#"{"content": "x", "entryDate": "2025-06-15"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_entry_date_fails_to_deserialize() {
        let result = serde_json::from_str::<EntryInput>(
            r#"{"title": "t", "content": "x", "entryDate": "yesterday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn blank_title_is_rejected() {
        let input = EntryInput {
            title: "   ".to_string(),
            content: String::new(),
            entry_date: date(2025, 1, 1),
            images: ListUpdate::Unset,
            tags: ListUpdate::Unset,
        };
        assert!(matches!(input.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let input = EntryInput {
            title: "x".repeat(MAX_TITLE_LEN + 1),
            content: String::new(),
            entry_date: date(2025, 1, 1),
            images: ListUpdate::Unset,
            tags: ListUpdate::Unset,
        };
        assert!(matches!(input.validate(), Err(AppError::Validation(_))));
    }
}
