use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{JournalEntry, JournalImage};

/// An entry as returned by the API, with its tag names and images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub entry_date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub images: Vec<ImageView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub id: i64,
    pub image_data_base64: String,
    pub content_type: String,
    pub caption: Option<String>,
    pub journal_entry_id: i64,
}

impl EntryView {
    pub fn assemble(entry: JournalEntry, tags: Vec<String>, images: Vec<JournalImage>) -> Self {
        Self {
            id: entry.id,
            entry_date: entry.entry_date_utc(),
            title: entry.title,
            content: entry.content,
            created_at: entry.created_at,
            modified_at: entry.modified_at,
            tags,
            images: images.into_iter().map(ImageView::from).collect(),
        }
    }
}

impl From<JournalImage> for ImageView {
    fn from(image: JournalImage) -> Self {
        Self {
            id: image.id,
            image_data_base64: STANDARD.encode(&image.image_data),
            content_type: image.content_type,
            caption: image.caption,
            journal_entry_id: image.journal_entry_id,
        }
    }
}
