//! # shopfront-db: Product Store for Shopfront
//!
//! This crate owns the catalog's embedded product database.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  Catalog pages (list / detail / add / edit)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shopfront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │ (schema.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ ensure_open   │◄───│ insert        │    │ user_version │  │   │
//! │  │   │ OnceCell pool │    │ list / get    │    │ products     │  │   │
//! │  │   │ close         │    │ update/delete │    │ 3 indexes    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/ecommerce_db.sqlite                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Database location and pool sizing
//! - [`pool`] - Lazily opened connection pool
//! - [`schema`] - Versioned table and index definitions
//! - [`error`] - Store error types and the UI-facing error report
//! - [`repository`] - Product CRUD in scoped transactions
//! - [`seed`] - Demo catalog for empty installs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopfront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?);
//!
//! // First operation opens the database and defines the schema
//! let product = db.products().insert(&form).await?;
//! let all = db.products().list_all().await?;
//! db.products().delete_by_slug(&product.slug).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult, ErrorKind, ErrorReport};
pub use pool::Database;
pub use schema::SCHEMA_VERSION;

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
