use std::collections::HashSet;

use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::ListUpdate;
use crate::store::{entry_tags, tags};

/// What a tag reconciliation changed for one entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagChanges {
    pub created_tags: usize,
    pub links_added: usize,
    pub links_removed: usize,
}

/// Trim, drop blanks, and de-duplicate (case-sensitive), keeping first occurrences.
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Bring the tag links of `entry_id` in line with `requested`.
///
/// Missing tags are created for `user_id` before any link references them.
/// Tags that lose their last link are kept.
pub async fn reconcile_tags(
    conn: &mut SqliteConnection,
    entry_id: i64,
    user_id: &str,
    requested: ListUpdate<String>,
) -> Result<TagChanges, AppError> {
    let Some(requested) = requested.into_items() else {
        return Ok(TagChanges::default());
    };
    let names = normalize_tag_names(&requested);

    let mut changes = TagChanges::default();

    if names.is_empty() {
        changes.links_removed = entry_tags::delete_for_entry(conn, entry_id).await? as usize;
        tracing::debug!(entry_id, removed = changes.links_removed, "cleared tag links");
        return Ok(changes);
    }

    let mut wanted = Vec::with_capacity(names.len());
    for name in &names {
        let tag = match tags::find_by_name(conn, user_id, name).await? {
            Some(tag) => tag,
            None => {
                changes.created_tags += 1;
                tags::insert(conn, user_id, name).await?
            }
        };
        wanted.push(tag.id);
    }

    let current = entry_tags::list_for_entry(conn, entry_id).await?;

    for link in &current {
        if !wanted.contains(&link.tag_id) {
            entry_tags::delete(conn, entry_id, link.tag_id).await?;
            changes.links_removed += 1;
        }
    }

    for tag_id in wanted {
        if !current.iter().any(|link| link.tag_id == tag_id) {
            entry_tags::insert(conn, entry_id, tag_id).await?;
            changes.links_added += 1;
        }
    }

    tracing::debug!(
        entry_id,
        created = changes.created_tags,
        added = changes.links_added,
        removed = changes.links_removed,
        "reconciled tags"
    );

    Ok(changes)
}
