//! # Schema Definition
//!
//! Versioned schema for the product database.
//!
//! ## How Versioning Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Upgrade Process                                    │
//! │                                                                         │
//! │  Database::ensure_open()                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Read PRAGMA user_version                                              │
//! │       │                                                                 │
//! │       ├── > SCHEMA_VERSION? → VersionTooNew (refuse to open)           │
//! │       ├── = SCHEMA_VERSION? → nothing to do                            │
//! │       │                                                                 │
//! │       ▼  (< SCHEMA_VERSION, one transaction)                           │
//! │  define_schema                                                         │
//! │       ├── products table exists? → skip                                │
//! │       └── create products + category/price/slug indexes                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PRAGMA user_version = SCHEMA_VERSION, commit                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bumping the Version
//! Only bump [`SCHEMA_VERSION`] when a table or lookup index is added, and
//! add a step for the new version instead of editing the v1 definition.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Schema version this build writes and understands.
pub const SCHEMA_VERSION: i64 = 1;

/// The single product table.
pub const PRODUCTS_TABLE: &str = "products";

/// Non-unique lookup indexes on the product table: (index name, column).
pub const PRODUCT_INDEXES: [(&str, &str); 3] = [
    ("idx_products_category", "category"),
    ("idx_products_price", "price"),
    ("idx_products_slug", "slug"),
];

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE products (
        id          TEXT    PRIMARY KEY NOT NULL CHECK (length(id) > 0),
        name        TEXT    NOT NULL,
        description TEXT    NOT NULL,
        price       REAL    NOT NULL,
        slug        TEXT    NOT NULL,
        category    TEXT    NOT NULL,
        image_url   TEXT    NOT NULL,
        created_at  INTEGER NOT NULL,
        updated_at  INTEGER NOT NULL
    )
"#;

/// Outcome of an upgrade that actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaUpgrade {
    /// `user_version` found on open.
    pub from_version: i64,
    /// `user_version` after the upgrade.
    pub to_version: i64,
    /// Whether the products table was created by this upgrade.
    pub created_table: bool,
}

/// A lookup index on the product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub name: String,
    pub column: String,
    pub unique: bool,
}

/// Brings the database up to [`SCHEMA_VERSION`].
///
/// ## Returns
/// * `Ok(Some(upgrade))` - An upgrade ran
/// * `Ok(None)` - Already at the current version
/// * `Err(DbError::VersionTooNew)` - Written by a newer build
pub async fn upgrade(pool: &SqlitePool) -> DbResult<Option<SchemaUpgrade>> {
    // Two handles may open the same file at once; the second waits here.
    let mut tx = pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(upgrade_failed)?;

    let current = current_version(&mut tx).await.map_err(upgrade_failed)?;

    if current > SCHEMA_VERSION {
        return Err(DbError::VersionTooNew {
            found: current,
            supported: SCHEMA_VERSION,
        });
    }

    if current == SCHEMA_VERSION {
        debug!(version = current, "Schema is current");
        tx.rollback().await.map_err(upgrade_failed)?;
        return Ok(None);
    }

    info!(from = current, to = SCHEMA_VERSION, "Upgrading schema");

    let created_table = define_schema(&mut tx).await.map_err(upgrade_failed)?;

    // PRAGMA does not accept bound parameters.
    let stamp = format!("PRAGMA user_version = {}", SCHEMA_VERSION);
    sqlx::query(&stamp)
        .execute(&mut *tx)
        .await
        .map_err(upgrade_failed)?;

    tx.commit().await.map_err(upgrade_failed)?;

    info!(version = SCHEMA_VERSION, created_table, "Schema upgrade complete");

    Ok(Some(SchemaUpgrade {
        from_version: current,
        to_version: SCHEMA_VERSION,
        created_table,
    }))
}

/// Declares the product table and its lookup indexes.
///
/// Skips everything when the table already exists. Must run inside the
/// upgrade transaction.
///
/// ## Returns
/// `true` if the table was created.
pub async fn define_schema(conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let existing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")
            .bind(PRODUCTS_TABLE)
            .fetch_one(&mut *conn)
            .await?;

    if existing > 0 {
        debug!(table = PRODUCTS_TABLE, "Table already exists, skipping creation");
        return Ok(false);
    }

    sqlx::query(CREATE_PRODUCTS_TABLE)
        .execute(&mut *conn)
        .await?;

    for (index, column) in PRODUCT_INDEXES {
        let ddl = format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            index, PRODUCTS_TABLE, column
        );
        sqlx::query(&ddl).execute(&mut *conn).await?;
    }

    info!(table = PRODUCTS_TABLE, "Product table created");
    Ok(true)
}

async fn current_version(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(&mut *conn)
        .await
}

fn upgrade_failed(err: sqlx::Error) -> DbError {
    DbError::UpgradeFailed { source: err }
}

/// Returns `(SCHEMA_VERSION, version stored in the file)`.
///
/// ## Usage
/// For diagnostics and health checks.
pub async fn status(pool: &SqlitePool) -> DbResult<(i64, i64)> {
    let stored: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
        .map_err(DbError::read)?;

    Ok((SCHEMA_VERSION, stored))
}

/// Lists the declared lookup indexes on the product table, by name.
pub async fn indexes(pool: &SqlitePool) -> DbResult<Vec<IndexInfo>> {
    let rows: Vec<(String, i64, String)> = sqlx::query_as(
        r#"
        SELECT il.name, il."unique", ii.name
        FROM pragma_index_list(?1) AS il
        JOIN pragma_index_info(il.name) AS ii
        WHERE il.origin = 'c'
        ORDER BY il.name
        "#,
    )
    .bind(PRODUCTS_TABLE)
    .fetch_all(pool)
    .await
    .map_err(DbError::read)?;

    Ok(rows
        .into_iter()
        .map(|(name, unique, column)| IndexInfo {
            name,
            column,
            unique: unique != 0,
        })
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn bare_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upgrade_from_empty_creates_table() {
        let pool = bare_pool().await;

        let upgrade = upgrade(&pool).await.unwrap().unwrap();
        assert_eq!(upgrade.from_version, 0);
        assert_eq!(upgrade.to_version, SCHEMA_VERSION);
        assert!(upgrade.created_table);

        assert_eq!(status(&pool).await.unwrap(), (SCHEMA_VERSION, SCHEMA_VERSION));
    }

    #[tokio::test]
    async fn test_upgrade_is_noop_at_current_version() {
        let pool = bare_pool().await;

        assert!(upgrade(&pool).await.unwrap().is_some());
        assert!(upgrade(&pool).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_indexes_are_non_unique() {
        let pool = bare_pool().await;
        upgrade(&pool).await.unwrap();

        let indexes = indexes(&pool).await.unwrap();
        let columns: Vec<&str> = indexes.iter().map(|i| i.column.as_str()).collect();
        assert_eq!(columns, vec!["category", "price", "slug"]);
        assert!(indexes.iter().all(|i| !i.unique));
    }

    #[tokio::test]
    async fn test_define_schema_skips_existing_table() {
        let pool = bare_pool().await;
        sqlx::query("CREATE TABLE products (id TEXT PRIMARY KEY)")
            .execute(&pool)
            .await
            .unwrap();

        let upgrade = upgrade(&pool).await.unwrap().unwrap();
        assert!(!upgrade.created_table);
        assert!(indexes(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_newer_version_is_refused() {
        let pool = bare_pool().await;
        sqlx::query("PRAGMA user_version = 7")
            .execute(&pool)
            .await
            .unwrap();

        let err = upgrade(&pool).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::VersionTooNew {
                found: 7,
                supported: SCHEMA_VERSION
            }
        ));
    }
}
