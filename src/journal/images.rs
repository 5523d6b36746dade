use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::{JournalImage, ListUpdate, NewJournalImage};
use crate::store::images;

/// Client-submitted image: an existing image when `id > 0`, otherwise new.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub image_data_base64: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl ImageInput {
    pub fn existing_id(&self) -> Option<i64> {
        self.id.filter(|id| *id > 0)
    }

    /// Same image, treated as new regardless of any id the client sent.
    pub fn into_new(self) -> Self {
        Self { id: None, ..self }
    }
}

/// What an image reconciliation changed for one entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageChanges {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub skipped: usize,
}

pub fn decode_image_data(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded.trim())
}

/// Bring the images of `entry_id` in line with `requested`.
///
/// Malformed payloads never fail the reconciliation: a bad update keeps the
/// stored bytes, a bad addition is skipped.
pub async fn reconcile_images(
    conn: &mut SqliteConnection,
    entry_id: i64,
    requested: ListUpdate<ImageInput>,
) -> Result<ImageChanges, AppError> {
    let Some(requested) = requested.into_items() else {
        return Ok(ImageChanges::default());
    };

    let mut changes = ImageChanges::default();
    let current = images::list_for_entry(conn, entry_id).await?;

    let keep: Vec<i64> = requested.iter().filter_map(ImageInput::existing_id).collect();
    for image in &current {
        if !keep.contains(&image.id) {
            images::delete(conn, image.id).await?;
            changes.removed += 1;
        }
    }

    for input in requested {
        match input.existing_id() {
            Some(id) => {
                let Some(existing) = current.iter().find(|image| image.id == id) else {
                    tracing::warn!(entry_id, image_id = id, "ignoring image that does not belong to entry");
                    changes.skipped += 1;
                    continue;
                };
                let image = apply_image_update(existing, input);
                images::update(conn, &image).await?;
                changes.updated += 1;
            }
            None => {
                let image_data = match decode_image_data(&input.image_data_base64) {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::warn!(entry_id, error = %e, "skipping new image with invalid base64");
                        changes.skipped += 1;
                        continue;
                    }
                };
                let image = NewJournalImage {
                    journal_entry_id: entry_id,
                    image_data,
                    content_type: input.content_type,
                    caption: input.caption,
                };
                images::insert(conn, &image).await?;
                changes.added += 1;
            }
        }
    }

    tracing::debug!(
        entry_id,
        added = changes.added,
        updated = changes.updated,
        removed = changes.removed,
        skipped = changes.skipped,
        "reconciled images"
    );

    Ok(changes)
}

/// Metadata always follows the request; bytes only when a valid payload is sent.
fn apply_image_update(existing: &JournalImage, input: ImageInput) -> JournalImage {
    let mut image = existing.clone();
    if !input.image_data_base64.trim().is_empty() {
        match decode_image_data(&input.image_data_base64) {
            Ok(data) => image.image_data = data,
            Err(e) => {
                tracing::warn!(image_id = image.id, error = %e, "keeping stored image data, payload is not valid base64");
            }
        }
    }
    image.content_type = input.content_type;
    image.caption = input.caption;
    image
}
