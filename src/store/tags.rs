use sqlx::SqliteConnection;

use crate::models::Tag;

/// Exact, case-sensitive lookup of a tag within one owner's namespace.
pub async fn find_by_name(
    conn: &mut SqliteConnection,
    user_id: &str,
    name: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tags WHERE user_id = ? AND name = ?")
        .bind(user_id)
        .bind(name)
        .fetch_optional(conn)
        .await
}

pub async fn insert(conn: &mut SqliteConnection, user_id: &str, name: &str) -> Result<Tag, sqlx::Error> {
    let result = sqlx::query("INSERT INTO tags (user_id, name) VALUES (?, ?)")
        .bind(user_id)
        .bind(name)
        .execute(conn)
        .await?;

    Ok(Tag {
        id: result.last_insert_rowid(),
        user_id: user_id.to_string(),
        name: name.to_string(),
    })
}

/// Tag names linked to one entry, in link order.
pub async fn names_for_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    let names: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT t.name
        FROM tags t
        JOIN journal_entry_tags et ON et.tag_id = t.id
        WHERE et.journal_entry_id = ?
        ORDER BY et.rowid
        "#,
    )
    .bind(entry_id)
    .fetch_all(conn)
    .await?;

    Ok(names.into_iter().map(|(name,)| name).collect())
}

/// `(entry id, tag name)` pairs for every entry of `user_id`, in link order.
pub async fn names_for_owner(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<(i64, String)>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT et.journal_entry_id, t.name
        FROM journal_entry_tags et
        JOIN tags t ON t.id = et.tag_id
        JOIN journal_entries e ON e.id = et.journal_entry_id
        WHERE e.user_id = ?
        ORDER BY et.rowid
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
}
