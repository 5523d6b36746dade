use std::future::Future;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::journal::images::{reconcile_images, ImageInput};
use crate::journal::queries::get_entry;
use crate::journal::tags::reconcile_tags;
use crate::journal::{EntryInput, EntryView};
use crate::models::NewJournalEntry;
use crate::store::{entries, entry_tags, images, UnitOfWork};

/// Create an entry for `user_id` along with its tags and images.
pub async fn create_entry(
    pool: &SqlitePool,
    user_id: &str,
    input: EntryInput,
    cancel: &CancellationToken,
) -> Result<EntryView, AppError> {
    input.validate()?;

    let mut uow = UnitOfWork::new(pool.clone());
    uow.begin().await?;
    let result = run_cancellable(cancel, create_in_tx(uow.conn()?, user_id, input)).await;
    let id = finish(&mut uow, result).await?;

    tracing::info!(entry_id = id, user_id, "created journal entry");
    reload(pool, id, user_id).await
}

/// Replace the fields, tags and images of entry `id`.
///
/// Entries owned by someone else are reported as [`AppError::NotFound`].
pub async fn update_entry(
    pool: &SqlitePool,
    id: i64,
    user_id: &str,
    input: EntryInput,
    cancel: &CancellationToken,
) -> Result<EntryView, AppError> {
    input.validate()?;

    let mut uow = UnitOfWork::new(pool.clone());
    uow.begin().await?;
    let result = run_cancellable(cancel, update_in_tx(uow.conn()?, id, user_id, input)).await;
    finish(&mut uow, result).await?;

    tracing::info!(entry_id = id, user_id, "updated journal entry");
    reload(pool, id, user_id).await
}

/// Delete entry `id` with its tag links and images.
pub async fn delete_entry(
    pool: &SqlitePool,
    id: i64,
    user_id: &str,
    cancel: &CancellationToken,
) -> Result<(), AppError> {
    let mut uow = UnitOfWork::new(pool.clone());
    uow.begin().await?;
    let result = run_cancellable(cancel, delete_in_tx(uow.conn()?, id, user_id)).await;
    finish(&mut uow, result).await?;

    tracing::info!(entry_id = id, user_id, "deleted journal entry");
    Ok(())
}

async fn create_in_tx(
    conn: &mut SqliteConnection,
    user_id: &str,
    input: EntryInput,
) -> Result<i64, AppError> {
    let entry = NewJournalEntry::new(
        user_id.to_string(),
        input.title,
        input.content,
        input.entry_date,
    );
    let id = entries::insert(conn, &entry).await?;

    reconcile_tags(conn, id, user_id, input.tags).await?;
    // Client ids mean nothing for a brand new entry.
    reconcile_images(conn, id, input.images.map_items(ImageInput::into_new)).await?;

    Ok(id)
}

async fn update_in_tx(
    conn: &mut SqliteConnection,
    id: i64,
    user_id: &str,
    input: EntryInput,
) -> Result<(), AppError> {
    if entries::find_for_owner(conn, id, user_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    entries::update_fields(
        conn,
        id,
        &input.title,
        &input.content,
        input.entry_date,
        Utc::now(),
    )
    .await?;

    reconcile_tags(conn, id, user_id, input.tags).await?;
    reconcile_images(conn, id, input.images).await?;

    Ok(())
}

async fn delete_in_tx(conn: &mut SqliteConnection, id: i64, user_id: &str) -> Result<(), AppError> {
    if entries::find_for_owner(conn, id, user_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let links = entry_tags::delete_for_entry(conn, id).await?;
    let removed_images = images::delete_for_entry(conn, id).await?;
    entries::delete(conn, id).await?;

    tracing::debug!(entry_id = id, links, images = removed_images, "removed entry rows");
    Ok(())
}

/// Abandon `work` with [`AppError::Cancelled`] as soon as `cancel` fires.
async fn run_cancellable<T, F>(cancel: &CancellationToken, work: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        result = work => result,
    }
}

/// Commit on success, roll back on any failure and hand the failure back.
async fn finish<T>(uow: &mut UnitOfWork, result: Result<T, AppError>) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                tracing::error!("Rollback failed after {err}: {rollback_err}");
            }
            Err(err)
        }
    }
}

async fn reload(pool: &SqlitePool, id: i64, user_id: &str) -> Result<EntryView, AppError> {
    get_entry(pool, id, user_id).await?.ok_or(AppError::NotFound)
}
