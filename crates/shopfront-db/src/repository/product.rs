//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Insert from form data (store assigns id + timestamps)
//! - Bulk read, point read by id
//! - Full-record upsert
//! - Delete by slug (resolved to the primary key first)
//! - Index-backed lookups by slug, category and price
//!
//! ## Delete by Slug
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Why delete resolves the slug first                         │
//! │                                                                         │
//! │  The primary key is `id`, the detail page only knows `slug`.           │
//! │                                                                         │
//! │  ❌ DELETE FROM products WHERE id = 'sony-wh-1000xm5'                  │
//! │     → deletes nothing (or an unrelated row whose id is that string)    │
//! │                                                                         │
//! │  ✅ SELECT id FROM products WHERE slug = 'sony-wh-1000xm5'             │
//! │       ├── 0 rows  → NotFound, nothing changes                          │
//! │       ├── 2+ rows → AmbiguousSlug, nothing changes                     │
//! │       └── 1 row   → DELETE FROM products WHERE id = '<that id>'        │
//! │     (both statements in one BEGIN IMMEDIATE transaction)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::{ScopedTx, TxMode};
use shopfront_core::{Product, ProductFormData};

/// Builds a `SELECT` over every product column followed by `$tail`.
macro_rules! select_products {
    ($tail:literal) => {
        concat!(
            "SELECT id, name, description, price, slug, category, image_url, created_at, updated_at ",
            "FROM products ",
            $tail
        )
    };
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.insert(&form).await?;
/// let same = repo.get_by_id(&product.id).await?;
/// repo.delete_by_slug(&product.slug).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(db: Database) -> Self {
        ProductRepository { db }
    }

    /// Inserts a new product built from form data.
    ///
    /// ## What the Store Assigns
    /// - `id`: fresh UUID v4
    /// - `price`: coerced to a finite number (sign not checked)
    /// - `slug`: the form's slug, or one derived from the name
    /// - `created_at` = `updated_at` = now (ms)
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored record, exactly as persisted
    /// * `Err(DbError::InvalidRecord)` - Price is not a number
    /// * `Err(DbError::ConstraintViolation)` - Primary key collision
    #[instrument(name = "store::insert", skip_all, err(level = "warn"))]
    pub async fn insert(&self, form: &ProductFormData) -> DbResult<Product> {
        self.db.ensure_open().await?;

        let product = Product::from_form(generate_product_id(), form, now_millis())?;

        debug!(id = %product.id, slug = %product.slug, "Inserting product");

        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadWrite).await?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price, slug,
                category, image_url, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.slug)
        .bind(&product.category)
        .bind(&product.image_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(tx.conn())
        .await
        .map_err(DbError::write)?;

        tx.finish().await?;

        Ok(product)
    }

    /// Returns every product.
    ///
    /// No ordering is guaranteed; sort with
    /// [`shopfront_core::filter::sort_newest_first`] for the list page.
    #[instrument(name = "store::list_all", skip_all, err(level = "warn"))]
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadOnly).await?;

        let products: Vec<Product> = sqlx::query_as(select_products!(""))
            .fetch_all(tx.conn())
            .await
            .map_err(DbError::read)?;

        tx.finish().await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    #[instrument(name = "store::get_by_id", skip(self), err(level = "warn"))]
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadOnly).await?;

        let product: Option<Product> = sqlx::query_as(select_products!("WHERE id = ?1"))
            .bind(id)
            .fetch_optional(tx.conn())
            .await
            .map_err(DbError::read)?;

        tx.finish().await?;

        Ok(product)
    }

    /// Replaces the record stored under `product.id`, or inserts it.
    ///
    /// The whole record is written as given, timestamps included. Nothing is
    /// merged and `updated_at` is NOT refreshed; use
    /// [`Product::touched`] before calling if the edit should count as fresh.
    ///
    /// ## Returns
    /// * `Ok(())` - Record stored
    /// * `Err(DbError::InvalidRecord)` - Empty id or non-finite price
    #[instrument(name = "store::update", skip_all, fields(id = %product.id), err(level = "warn"))]
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        self.db.ensure_open().await?;

        if product.id.is_empty() {
            return Err(DbError::invalid("id", "must not be empty"));
        }
        if !product.price.is_finite() {
            return Err(DbError::invalid("price", "must be a finite number"));
        }

        debug!(slug = %product.slug, "Upserting product");

        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadWrite).await?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price, slug,
                category, image_url, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                price = excluded.price,
                slug = excluded.slug,
                category = excluded.category,
                image_url = excluded.image_url,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.slug)
        .bind(&product.category)
        .bind(&product.image_url)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(tx.conn())
        .await
        .map_err(DbError::write)?;

        tx.finish().await
    }

    /// Deletes the product whose slug is `slug`.
    ///
    /// ## Returns
    /// * `Ok(())` - The matching record was removed
    /// * `Err(DbError::NotFound)` - No product has this slug; nothing changed
    /// * `Err(DbError::AmbiguousSlug)` - Several products share it; nothing changed
    #[instrument(name = "store::delete_by_slug", skip(self), err(level = "warn"))]
    pub async fn delete_by_slug(&self, slug: &str) -> DbResult<()> {
        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadWrite).await?;

        let ids: Vec<String> = sqlx::query_scalar("SELECT id FROM products WHERE slug = ?1")
            .bind(slug)
            .fetch_all(tx.conn())
            .await
            .map_err(DbError::write)?;

        // Early returns drop `tx`, which rolls it back.
        let id = match ids.as_slice() {
            [] => return Err(DbError::not_found("Product", slug)),
            [id] => id.clone(),
            _ => {
                return Err(DbError::AmbiguousSlug {
                    slug: slug.to_string(),
                    count: ids.len(),
                })
            }
        };

        debug!(id = %id, "Resolved slug, deleting product");

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(&id)
            .execute(tx.conn())
            .await
            .map_err(DbError::write)?;

        tx.finish().await
    }

    /// Deletes a product by its primary key.
    ///
    /// ## Returns
    /// * `Ok(())` - Record removed
    /// * `Err(DbError::NotFound)` - No product has this id
    #[instrument(name = "store::delete", skip(self), err(level = "warn"))]
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadWrite).await?;

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(tx.conn())
            .await
            .map_err(DbError::write)?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        tx.finish().await
    }

    /// Gets a product by slug via the slug index.
    ///
    /// Slugs are not unique; when several products share one, the oldest
    /// is returned.
    #[instrument(name = "store::get_by_slug", skip(self), err(level = "warn"))]
    pub async fn get_by_slug(&self, slug: &str) -> DbResult<Option<Product>> {
        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadOnly).await?;

        let product: Option<Product> = sqlx::query_as(select_products!(
            "WHERE slug = ?1 ORDER BY created_at, id LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(tx.conn())
        .await
        .map_err(DbError::read)?;

        tx.finish().await?;

        Ok(product)
    }

    /// Lists products with exactly this category label, newest first.
    ///
    /// The match is case-sensitive; the list page's case-insensitive filter
    /// lives in [`shopfront_core::filter`].
    #[instrument(name = "store::list_by_category", skip(self), err(level = "warn"))]
    pub async fn list_by_category(&self, category: &str) -> DbResult<Vec<Product>> {
        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadOnly).await?;

        let products: Vec<Product> = sqlx::query_as(select_products!(
            "WHERE category = ?1 ORDER BY created_at DESC"
        ))
        .bind(category)
        .fetch_all(tx.conn())
        .await
        .map_err(DbError::read)?;

        tx.finish().await?;

        debug!(count = products.len(), "Listed products by category");
        Ok(products)
    }

    /// Lists products priced within `[min, max]`, cheapest first.
    ///
    /// A missing (or NaN) bound is open.
    #[instrument(name = "store::list_by_price_range", skip(self), err(level = "warn"))]
    pub async fn list_by_price_range(
        &self,
        min: Option<f64>,
        max: Option<f64>,
    ) -> DbResult<Vec<Product>> {
        let min = min.filter(|v| !v.is_nan()).unwrap_or(f64::NEG_INFINITY);
        let max = max.filter(|v| !v.is_nan()).unwrap_or(f64::INFINITY);

        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadOnly).await?;

        let products: Vec<Product> = sqlx::query_as(select_products!(
            "WHERE price >= ?1 AND price <= ?2 ORDER BY price, created_at"
        ))
        .bind(min)
        .bind(max)
        .fetch_all(tx.conn())
        .await
        .map_err(DbError::read)?;

        tx.finish().await?;

        debug!(count = products.len(), "Listed products by price");
        Ok(products)
    }

    /// Counts stored products.
    pub async fn count(&self) -> DbResult<i64> {
        let mut tx = ScopedTx::begin(&self.db, TxMode::ReadOnly).await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(tx.conn())
            .await
            .map_err(DbError::read)?;

        tx.finish().await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time in milliseconds since the Unix epoch.
fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::error::ErrorKind;
    use shopfront_core::PriceInput;
    use std::collections::HashSet;

    fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).products()
    }

    fn form(name: &str, category: &str, price: f64) -> ProductFormData {
        ProductFormData {
            name: name.to_string(),
            description: format!("{} description", name),
            price: PriceInput::Number(price),
            category: category.to_string(),
            image_url: "https://cdn.example.com/item.jpg".to_string(),
            slug: None,
        }
    }

    fn stored(id: &str, slug: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: "Stored directly".to_string(),
            price: 100.0,
            slug: slug.to_string(),
            category: "Electronics".to_string(),
            image_url: "/images/item.jpg".to_string(),
            created_at: 1_000,
            updated_at: 1_000,
        }
    }

    #[tokio::test]
    async fn test_first_operation_opens_database() {
        let db = Database::new(DbConfig::in_memory());
        assert!(!db.is_open());

        let products = db.products().list_all().await.unwrap();
        assert!(products.is_empty());
        assert!(db.is_open());
        assert_eq!(db.schema_creations(), 1);
    }

    #[tokio::test]
    async fn test_insert_assigns_identity_and_timestamps() {
        let repo = repo();

        let first = repo.insert(&form("Apple Watch Series 9 GPS", "Electronics", 450000.0)).await.unwrap();
        let second = repo.insert(&form("Apple Watch Series 9 GPS", "Electronics", 450000.0)).await.unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);
        assert!(first.created_at > 0);
        assert_eq!(first.slug, "apple-watch-series-9-gps");
    }

    #[tokio::test]
    async fn test_insert_coerces_text_price() {
        let repo = repo();
        let mut input = form("Yoga Mat", "Sports & Outdoors", 0.0);
        input.price = PriceInput::from("7000.50");

        let product = repo.insert(&input).await.unwrap();
        assert_eq!(product.price, 7000.5);
    }

    #[tokio::test]
    async fn test_insert_does_not_enforce_positive_price() {
        let repo = repo();
        let product = repo.insert(&form("Freebie", "Promo", -5.0)).await.unwrap();
        assert_eq!(product.price, -5.0);
    }

    #[tokio::test]
    async fn test_insert_rejects_non_numeric_price_without_writing() {
        let repo = repo();
        let mut input = form("Broken", "Electronics", 0.0);
        input.price = PriceInput::from("twelve");

        let err = repo.insert(&input).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidRecord { ref field, .. } if field == "price"));
        assert_eq!(err.kind(), ErrorKind::Write);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let repo = repo();
        let mut input = form("Bose QuietComfort Earbuds II", "Electronics", 75000.0);
        input.slug = Some("bose-earbuds".to_string());

        let inserted = repo.insert(&input).await.unwrap();
        let fetched = repo.get_by_id(&inserted.id).await.unwrap();

        assert_eq!(fetched, Some(inserted));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let repo = repo();
        assert_eq!(repo.get_by_id("does-not-exist").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_all_empty_store() {
        let repo = repo();
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let repo = repo();
        let original = repo.insert(&form("Coffee Maker", "Home Goods", 15000.0)).await.unwrap();

        let replacement = Product {
            id: original.id.clone(),
            name: "Coffee Maker Drip with Timer".to_string(),
            description: String::new(),
            price: 16000.0,
            slug: "coffee-maker-drip-with-timer".to_string(),
            category: "Kitchen".to_string(),
            image_url: String::new(),
            created_at: original.created_at,
            updated_at: original.updated_at,
        };

        repo.update(&replacement).await.unwrap();

        let fetched = repo.get_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(fetched, replacement);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_caller_timestamps() {
        let repo = repo();
        let original = repo.insert(&form("Wallet", "Accessories", 12000.0)).await.unwrap();

        let mut edit = original.to_form();
        edit.name = "Classic Leather Wallet".to_string();
        let edited = original.with_form(&edit).unwrap();
        repo.update(&edited).await.unwrap();

        let fetched = repo.get_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(fetched.updated_at, original.updated_at);
        assert_eq!(fetched.name, "Classic Leather Wallet");

        let touched = fetched.clone().touched(original.updated_at + 60_000);
        repo.update(&touched).await.unwrap();
        let fetched = repo.get_by_id(&original.id).await.unwrap().unwrap();
        assert_eq!(fetched.updated_at, original.updated_at + 60_000);
    }

    #[tokio::test]
    async fn test_update_inserts_when_absent() {
        let repo = repo();
        let product = stored("abc", "s1");

        repo.update(&product).await.unwrap();

        assert_eq!(repo.get_by_id("abc").await.unwrap(), Some(product));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_id() {
        let repo = repo();
        let err = repo.update(&stored("", "s1")).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidRecord { ref field, .. } if field == "id"));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_by_slug_resolves_id() {
        let repo = repo();
        repo.update(&stored("abc", "s1")).await.unwrap();

        repo.delete_by_slug("s1").await.unwrap();

        assert_eq!(repo.get_by_id("abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_by_slug_missing_leaves_table_unchanged() {
        let repo = repo();
        repo.update(&stored("abc", "s1")).await.unwrap();

        let err = repo.delete_by_slug("nonexistent").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_slug_ignores_row_whose_id_equals_slug() {
        let repo = repo();
        // An unrelated product whose primary key happens to be the slug text.
        repo.update(&stored("s1", "other")).await.unwrap();
        repo.update(&stored("abc", "s1")).await.unwrap();

        repo.delete_by_slug("s1").await.unwrap();

        assert!(repo.get_by_id("s1").await.unwrap().is_some());
        assert!(repo.get_by_id("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_by_slug_refuses_shared_slug() {
        let repo = repo();
        repo.update(&stored("a", "dup")).await.unwrap();
        repo.update(&stored("b", "dup")).await.unwrap();

        let err = repo.delete_by_slug("dup").await.unwrap_err();
        assert!(matches!(err, DbError::AmbiguousSlug { count: 2, .. }));
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.delete("a").await.unwrap();
        repo.delete_by_slug("dup").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let repo = repo();
        let err = repo.delete("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_both_kept() {
        let repo = repo();

        let speaker = form("Portable Bluetooth Speaker", "Electronics", 22000.0);
        let bottle = form("Stainless Steel Water Bottle", "Home Goods", 4500.0);

        let (a, b) = tokio::join!(repo.insert(&speaker), repo.insert(&bottle));
        let (a, b) = (a.unwrap(), b.unwrap());

        let ids: HashSet<String> = repo.list_all().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, HashSet::from([a.id, b.id]));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("catalog.sqlite")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = db.products();
                tokio::spawn(async move {
                    repo.insert(&form(&format!("Product {}", i), "Electronics", 10.0 * i as f64))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(db.products().list_all().await.unwrap().len(), 8);
        assert_eq!(db.schema_creations(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_deletes_and_updates_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("catalog.sqlite")));
        let repo = db.products();

        for i in 0..40 {
            repo.update(&stored(&format!("id-{}", i), &format!("item-{}", i)))
                .await
                .unwrap();
        }

        let mut handles = Vec::new();
        for i in 0..40 {
            let repo = db.products();
            handles.push(tokio::spawn(async move {
                repo.delete_by_slug(&format!("item-{}", i)).await
            }));

            let repo = db.products();
            handles.push(tokio::spawn(async move {
                repo.update(&stored(&format!("extra-{}", i), &format!("extra-{}", i)))
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let remaining = repo.list_all().await.unwrap();
        assert_eq!(remaining.len(), 40);
        assert!(remaining.iter().all(|p| p.id.starts_with("extra-")));
    }

    #[tokio::test]
    async fn test_get_by_slug_returns_oldest_match() {
        let repo = repo();
        let mut newer = stored("newer", "shared");
        newer.created_at = 2_000;
        repo.update(&newer).await.unwrap();
        repo.update(&stored("older", "shared")).await.unwrap();

        let found = repo.get_by_slug("shared").await.unwrap().unwrap();
        assert_eq!(found.id, "older");
        assert!(repo.get_by_slug("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let repo = repo();
        repo.insert(&form("Laptop", "Electronics", 1200000.0)).await.unwrap();
        repo.insert(&form("Chair", "Furniture", 750000.0)).await.unwrap();
        repo.insert(&form("Speaker", "Electronics", 22000.0)).await.unwrap();

        let electronics = repo.list_by_category("Electronics").await.unwrap();
        assert_eq!(electronics.len(), 2);
        assert!(electronics.iter().all(|p| p.category == "Electronics"));

        assert!(repo.list_by_category("electronics").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_price_range() {
        let repo = repo();
        repo.insert(&form("Bottle", "Home Goods", 4500.0)).await.unwrap();
        repo.insert(&form("Wallet", "Accessories", 12000.0)).await.unwrap();
        repo.insert(&form("Laptop", "Electronics", 1200000.0)).await.unwrap();

        let mid: Vec<String> = repo
            .list_by_price_range(Some(4500.0), Some(12000.0))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(mid, vec!["Bottle", "Wallet"]);

        let open_ended = repo.list_by_price_range(Some(10000.0), None).await.unwrap();
        assert_eq!(open_ended.len(), 2);

        let all = repo.list_by_price_range(None, Some(f64::NAN)).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_primary_key_is_constraint_violation() {
        let db = Database::new(DbConfig::in_memory());
        db.products().update(&stored("abc", "s1")).await.unwrap();

        let pool = db.ensure_open().await.unwrap();
        let err = sqlx::query(
            "INSERT INTO products (id, name, description, price, slug, category, image_url, created_at, updated_at) \
             VALUES ('abc', 'x', 'x', 1.0, 'x', 'x', 'x', 0, 0)",
        )
        .execute(pool)
        .await
        .map_err(DbError::write)
        .unwrap_err();

        assert!(matches!(err, DbError::ConstraintViolation { .. }));
        assert_eq!(err.kind(), ErrorKind::Write);
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = db.products().insert(&form("Late", "Electronics", 1.0)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);

        let err = db.products().list_all().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }
}
