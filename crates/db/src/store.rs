//! Transactional document store.
//!
//! `SeaDocumentStore` hands out one `SeaUnitOfWork` per engine operation.
//! Each unit of work wraps a single `DatabaseTransaction`, and every
//! collaborator call made through it runs inside that transaction.
//!
//! # Usage
//!
//! ```ignore
//! use ledgerline_core::DocumentService;
//! use ledgerline_db::SeaDocumentStore;
//!
//! let store = SeaDocumentStore::new(db);
//! let service = DocumentService::from_config(store, &config.documents);
//! let document = service.confirm(id).await?;
//! ```

use async_trait::async_trait;
use ledgerline_core::document::{StoreError, UnitOfWork, UnitOfWorkFactory};
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, SqlErr, TransactionTrait};
use tracing::debug;

/// Factory of database-backed units of work.
#[derive(Debug, Clone)]
pub struct SeaDocumentStore {
    db: DatabaseConnection,
}

impl SeaDocumentStore {
    /// Creates a store over a connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UnitOfWorkFactory for SeaDocumentStore {
    type Work = SeaUnitOfWork;

    async fn begin(&self) -> Result<SeaUnitOfWork, StoreError> {
        let txn = self.db.begin().await.map_err(store_err)?;
        Ok(SeaUnitOfWork { txn })
    }
}

/// One database transaction implementing every collaborator contract.
///
/// Dropping it without `commit` rolls the transaction back.
pub struct SeaUnitOfWork {
    txn: DatabaseTransaction,
}

impl SeaUnitOfWork {
    /// Returns the underlying transaction for executing queries.
    #[must_use]
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }
}

#[async_trait]
impl UnitOfWork for SeaUnitOfWork {
    async fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().await.map_err(store_err)?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.txn.rollback().await.map_err(store_err)?;
        debug!("Transaction rolled back");
        Ok(())
    }
}

/// Maps a database error onto the collaborator error type.
///
/// Unique violations become `Conflict` so callers can retry.
pub(crate) fn store_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => StoreError::Conflict(message),
        _ => StoreError::Backend(err.to_string()),
    }
}

/// Converts a 1-based line number to its column type.
pub(crate) fn line_no_to_db(line_no: u32) -> Result<i32, StoreError> {
    i32::try_from(line_no).map_err(|_| StoreError::Backend(format!("line number {line_no} out of range")))
}

/// Converts a stored line number back.
pub(crate) fn line_no_from_db(line_no: i32) -> Result<u32, StoreError> {
    u32::try_from(line_no).map_err(|_| StoreError::Backend(format!("invalid stored line number {line_no}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_sql_errors_are_backend_errors() {
        let err = store_err(DbErr::RecordNotFound("documents".to_string()));
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_line_numbers() {
        assert_eq!(line_no_to_db(3).unwrap(), 3);
        assert_eq!(line_no_from_db(3).unwrap(), 3);
        assert!(line_no_to_db(u32::MAX).is_err());
        assert!(line_no_from_db(-1).is_err());
    }
}
