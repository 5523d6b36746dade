use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqliteConnection;

use crate::models::{JournalEntry, NewJournalEntry};

/// Insert a new entry and return its generated id.
pub async fn insert(conn: &mut SqliteConnection, entry: &NewJournalEntry) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO journal_entries (user_id, title, content, entry_date, created_at, modified_at)
        VALUES (?, ?, ?, ?, ?, NULL)
        "#,
    )
    .bind(&entry.user_id)
    .bind(&entry.title)
    .bind(&entry.content)
    .bind(entry.entry_date)
    .bind(entry.created_at)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Entry `id` if it belongs to `user_id`.
pub async fn find_for_owner(
    conn: &mut SqliteConnection,
    id: i64,
    user_id: &str,
) -> Result<Option<JournalEntry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM journal_entries WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

/// All entries of `user_id`, newest entry date first.
pub async fn list_for_owner(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<JournalEntry>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM journal_entries WHERE user_id = ? ORDER BY entry_date DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
}

pub async fn update_fields(
    conn: &mut SqliteConnection,
    id: i64,
    title: &str,
    content: &str,
    entry_date: NaiveDate,
    modified_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE journal_entries
        SET title = ?, content = ?, entry_date = ?, modified_at = ?
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(entry_date)
    .bind(modified_at)
    .bind(id)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
