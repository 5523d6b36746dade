use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::AppError;
use crate::journal::EntryView;
use crate::store::{entries, images, tags};

/// All entries of `user_id`, newest entry date first.
pub async fn list_entries(pool: &SqlitePool, user_id: &str) -> Result<Vec<EntryView>, AppError> {
    let mut conn = pool.acquire().await?;

    let entries = entries::list_for_owner(&mut conn, user_id).await?;

    let mut tags_by_entry: HashMap<i64, Vec<String>> = HashMap::new();
    for (entry_id, name) in tags::names_for_owner(&mut conn, user_id).await? {
        tags_by_entry.entry(entry_id).or_default().push(name);
    }

    let mut images_by_entry: HashMap<i64, Vec<_>> = HashMap::new();
    for image in images::list_for_owner(&mut conn, user_id).await? {
        images_by_entry.entry(image.journal_entry_id).or_default().push(image);
    }

    Ok(entries
        .into_iter()
        .map(|entry| {
            let tags = tags_by_entry.remove(&entry.id).unwrap_or_default();
            let images = images_by_entry.remove(&entry.id).unwrap_or_default();
            EntryView::assemble(entry, tags, images)
        })
        .collect())
}

/// Entry `id` if it exists and belongs to `user_id`.
pub async fn get_entry(pool: &SqlitePool, id: i64, user_id: &str) -> Result<Option<EntryView>, AppError> {
    let mut conn = pool.acquire().await?;
    load_view(&mut conn, id, user_id).await
}

async fn load_view(
    conn: &mut SqliteConnection,
    id: i64,
    user_id: &str,
) -> Result<Option<EntryView>, AppError> {
    let Some(entry) = entries::find_for_owner(conn, id, user_id).await? else {
        return Ok(None);
    };
    let tags = tags::names_for_entry(conn, entry.id).await?;
    let images = images::list_for_entry(conn, entry.id).await?;

    Ok(Some(EntryView::assemble(entry, tags, images)))
}
