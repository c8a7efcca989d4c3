//! # Catalog Filtering
//!
//! Client-side filtering and ordering for the product list page.
//!
//! The store returns products in no particular order. Freshness ordering and
//! the category / price filters are applied here, after loading.
//!
//! ```text
//! list_all() ──► sort_newest_first ──► ProductFilter::apply ──► grid
//!                                          │
//!                                          ├── category: "all" | label (case-insensitive)
//!                                          └── price:    [min, max] inclusive
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::types::{Category, Product};
use crate::ALL_CATEGORIES;

/// Filter settings from the list page controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Category label; `None` or `"all"` disables the category filter.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// Creates an empty filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the price range. NaN bounds are ignored.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min.filter(|v| !v.is_nan());
        self.max_price = max.filter(|v| !v.is_nan());
        self
    }

    /// Returns `true` when no filter is active.
    pub fn is_empty(&self) -> bool {
        self.active_category().is_none() && self.min_price.is_none() && self.max_price.is_none()
    }

    fn active_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES))
    }

    /// Checks a single product against the filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.active_category() {
            if !product.category.trim().eq_ignore_ascii_case(category) {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }

        true
    }

    /// Returns the matching products, preserving input order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Sorts products newest first by `created_at`.
///
/// The sort is stable, so products created in the same millisecond keep
/// their relative order.
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Distinct categories present in `products`, in first-seen order.
///
/// Labels that differ only by case or punctuation collapse into the first
/// one seen (they share a slug).
pub fn unique_categories(products: &[Product]) -> Vec<Category> {
    let mut seen = HashSet::new();
    products
        .iter()
        .map(|p| Category::from_label(&p.category))
        .filter(|c| !c.name.is_empty() && seen.insert(c.slug.clone()))
        .collect()
}

/// Each of [`unique_categories`] with how many products fall under it.
///
/// Products are counted under the same slug grouping, so `"Electronics"`
/// and `"electronics"` add up to one entry.
pub fn category_counts(products: &[Product]) -> Vec<(Category, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for product in products {
        *counts
            .entry(Category::from_label(&product.category).slug)
            .or_default() += 1;
    }

    unique_categories(products)
        .into_iter()
        .map(|category| {
            let count = counts.get(&category.slug).copied().unwrap_or(0);
            (category, count)
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, price: f64, created_at: i64) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            price,
            slug: id.to_string(),
            category: category.to_string(),
            image_url: String::new(),
            created_at,
            updated_at: created_at,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("wallet", "Accessories", 12000.0, 3),
            product("laptop", "Electronics", 1200000.0, 1),
            product("earbuds", "electronics", 75000.0, 4),
            product("chair", "Furniture", 750000.0, 2),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let products = catalog();
        assert!(ProductFilter::new().is_empty());
        assert_eq!(ProductFilter::new().apply(&products).len(), 4);
        assert!(ProductFilter::new().category("All").is_empty());
    }

    #[test]
    fn test_category_filter_ignores_case() {
        let products = catalog();
        let filtered = ProductFilter::new().category("ELECTRONICS").apply(&products);
        assert_eq!(ids(&filtered), vec!["laptop", "earbuds"]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let products = catalog();
        let filtered = ProductFilter::new()
            .price_range(Some(12000.0), Some(750000.0))
            .apply(&products);
        assert_eq!(ids(&filtered), vec!["wallet", "earbuds", "chair"]);

        let filtered = ProductFilter::new()
            .price_range(Some(f64::NAN), Some(20000.0))
            .apply(&products);
        assert_eq!(ids(&filtered), vec!["wallet"]);
    }

    #[test]
    fn test_combined_filters() {
        let products = catalog();
        let filtered = ProductFilter::new()
            .category("electronics")
            .price_range(None, Some(100000.0))
            .apply(&products);
        assert_eq!(ids(&filtered), vec!["earbuds"]);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut products = catalog();
        sort_newest_first(&mut products);
        let order: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["earbuds", "wallet", "chair", "laptop"]);
    }

    #[test]
    fn test_unique_categories() {
        let categories = unique_categories(&catalog());
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Accessories", "Electronics", "Furniture"]);
    }

    #[test]
    fn test_category_counts_merge_case_variants() {
        let counts: Vec<(String, usize)> = category_counts(&catalog())
            .into_iter()
            .map(|(c, n)| (c.name, n))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Accessories".to_string(), 1),
                ("Electronics".to_string(), 2),
                ("Furniture".to_string(), 1),
            ]
        );
    }
}
