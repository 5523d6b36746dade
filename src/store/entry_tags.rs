use sqlx::SqliteConnection;

use crate::models::EntryTag;

pub async fn list_for_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<Vec<EntryTag>, sqlx::Error> {
    sqlx::query_as(
        "SELECT journal_entry_id, tag_id FROM journal_entry_tags WHERE journal_entry_id = ? ORDER BY rowid",
    )
    .bind(entry_id)
    .fetch_all(conn)
    .await
}

pub async fn insert(conn: &mut SqliteConnection, entry_id: i64, tag_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO journal_entry_tags (journal_entry_id, tag_id) VALUES (?, ?)")
        .bind(entry_id)
        .bind(tag_id)
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, entry_id: i64, tag_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM journal_entry_tags WHERE journal_entry_id = ? AND tag_id = ?")
        .bind(entry_id)
        .bind(tag_id)
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn delete_for_entry(conn: &mut SqliteConnection, entry_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM journal_entry_tags WHERE journal_entry_id = ?")
        .bind(entry_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
