use sqlx::SqliteConnection;

use crate::models::{JournalImage, NewJournalImage};

pub async fn list_for_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<Vec<JournalImage>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM journal_images WHERE journal_entry_id = ? ORDER BY id")
        .bind(entry_id)
        .fetch_all(conn)
        .await
}

/// Images of every entry owned by `user_id`.
pub async fn list_for_owner(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<JournalImage>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT i.*
        FROM journal_images i
        JOIN journal_entries e ON e.id = i.journal_entry_id
        WHERE e.user_id = ?
        ORDER BY i.id
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
}

pub async fn insert(conn: &mut SqliteConnection, image: &NewJournalImage) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO journal_images (journal_entry_id, image_data, content_type, caption)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(image.journal_entry_id)
    .bind(&image.image_data)
    .bind(&image.content_type)
    .bind(&image.caption)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(conn: &mut SqliteConnection, image: &JournalImage) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE journal_images SET image_data = ?, content_type = ?, caption = ? WHERE id = ?",
    )
    .bind(&image.image_data)
    .bind(&image.content_type)
    .bind(&image.caption)
    .bind(image.id)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM journal_images WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn delete_for_entry(conn: &mut SqliteConnection, entry_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM journal_images WHERE journal_entry_id = ?")
        .bind(entry_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
