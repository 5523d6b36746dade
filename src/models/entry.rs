use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl JournalEntry {
    pub fn entry_date_utc(&self) -> DateTime<Utc> {
        midnight_utc(self.entry_date)
    }
}

/// An entry that has not been written yet; storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl NewJournalEntry {
    pub fn new(user_id: String, title: String, content: String, entry_date: NaiveDate) -> Self {
        Self {
            user_id,
            title,
            content,
            entry_date,
            created_at: Utc::now(),
        }
    }
}

/// Midnight UTC of the given calendar day.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
