use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalImage {
    pub id: i64,
    pub journal_entry_id: i64,
    pub image_data: Vec<u8>,
    pub content_type: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewJournalImage {
    pub journal_entry_id: i64,
    pub image_data: Vec<u8>,
    pub content_type: String,
    pub caption: Option<String>,
}
