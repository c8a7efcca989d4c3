//! # Repository Module
//!
//! Repository implementations for the Product Store.
//!
//! ## Transaction Scoping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 One Operation = One Transaction                         │
//! │                                                                         │
//! │  repo.get_by_id("abc")                                                 │
//! │       │                                                                 │
//! │       ├── ensure_open()            (fails → Connection error)          │
//! │       ├── begin(TxMode::ReadOnly)                                      │
//! │       ├── SELECT ...               (fails → Read error)                │
//! │       └── finish                                                       │
//! │                                                                         │
//! │  repo.update(&product)                                                 │
//! │       │                                                                 │
//! │       ├── ensure_open()                                                │
//! │       ├── BEGIN IMMEDIATE          (waits up to busy_timeout)          │
//! │       ├── INSERT ... ON CONFLICT   (fails → Write error, rolled back)  │
//! │       └── commit                                                       │
//! │                                                                         │
//! │  No operation spans more than one transaction and no transaction       │
//! │  spans more than one operation.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and index lookups

pub mod product;

use sqlx::{Sqlite, Transaction};

use crate::error::{DbError, DbResult};
use crate::pool::Database;

/// The access a transaction needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    /// Only reads; finished with a rollback since there is nothing to keep.
    ReadOnly,
    /// Reads and writes; finished with a commit.
    ///
    /// Begins `IMMEDIATE`: the write lock is held before the first read, so
    /// a read-then-write operation waits out `busy_timeout` instead of
    /// failing with `SQLITE_BUSY` when another writer commits in between.
    ReadWrite,
}

impl TxMode {
    /// The statement that opens a transaction of this mode.
    pub fn begin_statement(self) -> &'static str {
        match self {
            TxMode::ReadOnly => "BEGIN DEFERRED",
            TxMode::ReadWrite => "BEGIN IMMEDIATE",
        }
    }

    /// Classifies a native error raised inside a transaction of this mode.
    pub fn classify(self, err: sqlx::Error) -> DbError {
        match self {
            TxMode::ReadOnly => DbError::read(err),
            TxMode::ReadWrite => DbError::write(err),
        }
    }
}

/// A transaction scoped to one repository operation.
pub(crate) struct ScopedTx {
    tx: Transaction<'static, Sqlite>,
    mode: TxMode,
}

impl ScopedTx {
    /// Ensures the database is open, then begins a transaction.
    pub(crate) async fn begin(db: &Database, mode: TxMode) -> DbResult<Self> {
        let pool = db.ensure_open().await?;
        let tx = pool
            .begin_with(mode.begin_statement())
            .await
            .map_err(|e| mode.classify(e))?;
        Ok(ScopedTx { tx, mode })
    }

    /// The connection to run statements on.
    pub(crate) fn conn(&mut self) -> &mut sqlx::SqliteConnection {
        &mut *self.tx
    }

    /// Ends the transaction: commit for writes, rollback for reads.
    ///
    /// Dropping a `ScopedTx` without finishing rolls it back.
    pub(crate) async fn finish(self) -> DbResult<()> {
        let mode = self.mode;
        let result = match mode {
            TxMode::ReadOnly => self.tx.rollback().await,
            TxMode::ReadWrite => self.tx.commit().await,
        };
        result.map_err(|e| mode.classify(e))
    }
}
