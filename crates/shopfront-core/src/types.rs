//! # Domain Types
//!
//! Core domain types used throughout Shopfront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductFormData │   │    Product      │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (UUID)      │   │  slug           │       │
//! │  │  description    │   │  slug (lookup)  │   │  name           │       │
//! │  │  price (input)  │   │  price (f64)    │   └─────────────────┘       │
//! │  │  category       │   │  createdAt (ms) │                              │
//! │  │  imageUrl       │   │  updatedAt (ms) │   ┌─────────────────┐       │
//! │  │  slug?          │   └─────────────────┘   │ ProductCategory │       │
//! │  └─────────────────┘                         │  (known labels) │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity
//! - `id`: UUID v4, assigned by the store, immutable, the primary key
//! - `slug`: URL-friendly, derived from the name, indexed but NOT unique

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::slug::generate_slug;

// =============================================================================
// Product
// =============================================================================

/// A catalog product as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4), the primary key.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Long-form description shown on the detail page.
    pub description: String,

    /// Price in the catalog currency. Not constrained by the store.
    pub price: f64,

    /// URL-friendly identifier derived from the name.
    pub slug: String,

    /// Free-form category label.
    pub category: String,

    /// Image location (absolute URL or site path).
    pub image_url: String,

    /// Creation time, milliseconds since the Unix epoch.
    #[ts(type = "number")]
    pub created_at: i64,

    /// Last update time, milliseconds since the Unix epoch.
    #[ts(type = "number")]
    pub updated_at: i64,
}

impl Product {
    /// Builds a new record from form data.
    ///
    /// The caller supplies the identity and clock; this is how the store
    /// materializes an insert. `created_at == updated_at` on the result.
    pub fn from_form(id: impl Into<String>, form: &ProductFormData, now_ms: i64) -> CoreResult<Self> {
        Ok(Product {
            id: id.into(),
            name: form.name.clone(),
            description: form.description.clone(),
            price: form.price.coerce()?,
            slug: form.resolved_slug(),
            category: form.category.clone(),
            image_url: form.image_url.clone(),
            created_at: now_ms,
            updated_at: now_ms,
        })
    }

    /// Returns the full replacement record for an edit.
    ///
    /// Every editable field comes from `form`; `id` and both timestamps are
    /// kept. Stamp `updated_at` yourself with [`Product::touched`] if the
    /// edit should count as fresh.
    pub fn with_form(&self, form: &ProductFormData) -> CoreResult<Self> {
        Ok(Product {
            id: self.id.clone(),
            name: form.name.clone(),
            description: form.description.clone(),
            price: form.price.coerce()?,
            slug: form.resolved_slug(),
            category: form.category.clone(),
            image_url: form.image_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    /// Returns a copy with `updated_at` set to `now_ms`.
    pub fn touched(mut self, now_ms: i64) -> Self {
        self.updated_at = now_ms;
        self
    }

    /// Returns the form view of this product, used to prefill an edit form.
    pub fn to_form(&self) -> ProductFormData {
        ProductFormData {
            name: self.name.clone(),
            description: self.description.clone(),
            price: PriceInput::Number(self.price),
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            slug: Some(self.slug.clone()),
        }
    }

    /// Returns the known category this product belongs to, if any.
    pub fn known_category(&self) -> Option<ProductCategory> {
        self.category.parse().ok()
    }
}

// =============================================================================
// Price Input
// =============================================================================

/// A price as it arrives from a form: either already numeric or raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// Converts the input to a finite number.
    ///
    /// Blank text counts as zero. Positivity is not checked here; that is a
    /// form rule (see [`crate::validation::validate_price`]).
    pub fn coerce(&self) -> CoreResult<f64> {
        let value = match self {
            PriceInput::Number(value) => *value,
            PriceInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    0.0
                } else {
                    text.parse::<f64>().map_err(|_| CoreError::InvalidPrice {
                        input: text.to_string(),
                    })?
                }
            }
        };

        if !value.is_finite() {
            return Err(CoreError::InvalidPrice {
                input: self.to_string(),
            });
        }

        Ok(value)
    }
}

impl Default for PriceInput {
    fn default() -> Self {
        PriceInput::Number(0.0)
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl From<&str> for PriceInput {
    fn from(text: &str) -> Self {
        PriceInput::Text(text.to_string())
    }
}

impl fmt::Display for PriceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceInput::Number(value) => write!(f, "{}", value),
            PriceInput::Text(text) => f.write_str(text),
        }
    }
}

// =============================================================================
// Product Form Data
// =============================================================================

/// Product fields as produced by the add/edit form.
///
/// Excludes everything the store assigns (`id`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductFormData {
    pub name: String,
    pub description: String,
    pub price: PriceInput,
    pub category: String,
    pub image_url: String,
    /// Explicit slug. When absent or blank the slug is derived from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub slug: Option<String>,
}

impl ProductFormData {
    /// The slug the record will be stored under.
    pub fn resolved_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => generate_slug(&self.name),
        }
    }
}

// =============================================================================
// Categories
// =============================================================================

/// The category labels the catalog knows about.
///
/// Products may carry any label; this set is advisory and never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Fashion,
    Footwear,
}

impl ProductCategory {
    /// Every known category, in display order.
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::Electronics,
        ProductCategory::Clothing,
        ProductCategory::Fashion,
        ProductCategory::Footwear,
    ];

    /// Stored value (lowercase).
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "electronics",
            ProductCategory::Clothing => "clothing",
            ProductCategory::Fashion => "fashion",
            ProductCategory::Footwear => "footwear",
        }
    }

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "Electronics",
            ProductCategory::Clothing => "Clothing",
            ProductCategory::Fashion => "Fashion",
            ProductCategory::Footwear => "Footwear",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProductCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("'{}' is not a known category", wanted),
            })
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A category entry for navigation and the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// URL-friendly identifier (e.g., `home-goods`).
    pub slug: String,
    /// Display name (e.g., `Home Goods`).
    pub name: String,
}

impl Category {
    /// Creates a category entry from a free-form label.
    pub fn from_label(label: &str) -> Self {
        let name = label.trim().to_string();
        Category {
            slug: generate_slug(&name),
            name,
        }
    }
}

impl From<ProductCategory> for Category {
    fn from(category: ProductCategory) -> Self {
        Category {
            slug: category.as_str().to_string(),
            name: category.label().to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
