//! # Connection Management
//!
//! The owned handle to the product database and its lazily opened pool.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Handle                                    │
//! │                                                                         │
//! │  Application Startup                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config) ← cheap, touches nothing on disk                │
//! │       │                                                                 │
//! │       │  cloned into every consumer (Arc inside)                       │
//! │       ▼                                                                 │
//! │  db.products().list_all()                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ensure_open() ──► OnceCell<SqlitePool>                                │
//! │       │              ├── set?  → return cached pool                    │
//! │       │              └── empty → connect + schema upgrade, cache        │
//! │       │                 (concurrent callers await the same attempt;    │
//! │       │                  a failed attempt is not cached)               │
//! │       ▼                                                                 │
//! │  one scoped transaction per operation                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each `Database` is independent, so tests build one per test case against
//! [`DbConfig::in_memory`].

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::schema;

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::from_env()?);
///
/// // First operation opens the file and creates the schema
/// let products = db.products().list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

#[derive(Debug)]
struct DatabaseInner {
    config: DbConfig,
    pool: OnceCell<SqlitePool>,
    schema_creations: AtomicUsize,
    closed: AtomicBool,
}

impl Database {
    /// Creates a handle without opening the database.
    pub fn new(config: DbConfig) -> Self {
        Database {
            inner: Arc::new(DatabaseInner {
                config,
                pool: OnceCell::new(),
                schema_creations: AtomicUsize::new(0),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Creates a handle and opens the database immediately.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let db = Database::open(DbConfig::in_memory()).await?;
    /// assert!(db.is_open());
    /// ```
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        let db = Database::new(config);
        db.ensure_open().await?;
        Ok(db)
    }

    /// Returns the open pool, opening and upgrading the database first if
    /// this is the first successful call.
    ///
    /// ## Guarantees
    /// - Idempotent: later calls return the cached pool without reopening
    /// - Safe to call concurrently; only one open attempt runs at a time
    /// - Not sticky on failure: the next call tries again
    pub async fn ensure_open(&self) -> DbResult<&SqlitePool> {
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(DbError::Closed);
        }

        self.inner.pool.get_or_try_init(|| self.connect()).await
    }

    /// Opens the pool and runs the schema upgrade.
    async fn connect(&self) -> DbResult<SqlitePool> {
        let config = &self.inner.config;

        info!(
            path = %config.database_path.display(),
            "Opening product database"
        );

        let base_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(DbError::connection)?
        } else {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| DbError::connection(sqlx::Error::Io(e)))?;
                }
            }

            SqliteConnectOptions::new()
                .filename(&config.database_path)
                // WAL mode: readers don't block the writer
                .journal_mode(SqliteJournalMode::Wal)
                // NORMAL synchronous: safe from corruption, may lose the
                // last transaction on power loss
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };
        let connect_options = base_options.busy_timeout(config.busy_timeout);

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);

        if config.is_in_memory() {
            // Recycling the only connection would drop the whole database.
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(DbError::connection)?;

        info!(max_connections = config.max_connections, "Database pool created");

        match schema::upgrade(&pool).await {
            Ok(Some(upgrade)) => {
                if upgrade.created_table {
                    self.inner.schema_creations.fetch_add(1, Ordering::AcqRel);
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "Schema upgrade failed, closing pool");
                pool.close().await;
                return Err(err);
            }
        }

        info!("Product database ready");
        Ok(pool)
    }

    /// Returns the configuration this handle was built with.
    pub fn config(&self) -> &DbConfig {
        &self.inner.config
    }

    /// Returns `true` once the database has been opened (and not closed).
    pub fn is_open(&self) -> bool {
        self.inner.pool.initialized() && !self.inner.closed.load(Ordering::Acquire)
    }

    /// How many times this handle created the product table (0 or 1).
    pub fn schema_creations(&self) -> usize {
        self.inner.schema_creations.load(Ordering::Acquire)
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let product = db.products().get_by_id("uuid-here").await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, every operation fails with [`DbError::Closed`].
    pub async fn close(&self) {
        info!("Closing product database");
        self.inner.closed.store(true, Ordering::Release);
        if let Some(pool) = self.inner.pool.get() {
            pool.close().await;
        }
    }

    /// Checks if the database is healthy (opens it if needed).
    ///
    /// ## Returns
    /// * `true` - Database is responsive
    /// * `false` - Database is unavailable
    pub async fn health_check(&self) -> bool {
        match self.ensure_open().await {
            Ok(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            Err(_) => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
