//! # shopfront-core: Pure Catalog Logic for Shopfront
//!
//! This crate holds everything about the product catalog that does not touch
//! storage: the record shapes, slug generation, form validation and the
//! client-side filtering the catalog pages apply after loading products.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Catalog UI (external)                        │   │
//! │  │    List page ──► Detail page ──► Edit form ──► Add form         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   slug    │  │  filter   │  │ validation│  │   │
//! │  │   │  Product  │  │ generate_ │  │ category/ │  │   form    │  │   │
//! │  │   │  FormData │  │   slug    │  │   price   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shopfront-db (Product Store)                    │   │
//! │  │          SQLite schema, versioning, CRUD transactions           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductFormData, categories)
//! - [`slug`] - URL-friendly slug generation
//! - [`filter`] - Category / price filtering and freshness ordering
//! - [`error`] - Domain error types
//! - [`validation`] - Form-layer validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::slug::generate_slug;
//!
//! assert_eq!(generate_slug("  Apple Watch Series 9 GPS "), "apple-watch-series-9-gps");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod slug;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use filter::ProductFilter;
pub use slug::generate_slug;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name accepted by the form layer.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a product description accepted by the form layer.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Category label that the list page uses to mean "no category filter".
pub const ALL_CATEGORIES: &str = "all";
