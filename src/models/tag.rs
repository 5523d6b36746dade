use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tag name owned by one user. `(user_id, name)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: i64,
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EntryTag {
    pub journal_entry_id: i64,
    pub tag_id: i64,
}
