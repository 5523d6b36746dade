//! Persistence for journal entries, tags, tag links and images.
//!
//! Each entity has its own repository module of plain async functions over a
//! `SqliteConnection`. Writers are handed the connection of the transaction
//! owned by a [`UnitOfWork`]; readers can use any pooled connection.

pub mod entries;
pub mod entry_tags;
pub mod images;
pub mod tags;

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::error::AppError;

/// One explicit transaction boundary over the pool.
///
/// At most one transaction may be open at a time. Dropping a unit of work
/// with an open transaction rolls it back.
pub struct UnitOfWork {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
}

impl UnitOfWork {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, tx: None }
    }

    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    pub async fn begin(&mut self) -> Result<(), AppError> {
        if self.tx.is_some() {
            tracing::error!("begin called while a transaction is already open");
            return Err(AppError::TransactionInProgress);
        }
        self.tx = Some(self.pool.begin().await?);
        Ok(())
    }

    /// Connection of the open transaction.
    pub fn conn(&mut self) -> Result<&mut SqliteConnection, AppError> {
        self.tx.as_deref_mut().ok_or(AppError::NoTransaction)
    }

    pub async fn commit(&mut self) -> Result<(), AppError> {
        let tx = self.tx.take().ok_or(AppError::NoTransaction)?;
        tx.commit().await?;
        Ok(())
    }

    /// Roll back the open transaction, if any.
    pub async fn rollback(&mut self) -> Result<(), AppError> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}
