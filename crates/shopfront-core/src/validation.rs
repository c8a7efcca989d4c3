//! # Validation Module
//!
//! Form-layer validation for the product add/edit forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (THIS MODULE)                                           │
//! │  ├── Required fields, positive price, image URL shape                  │
//! │  └── Per-field messages for the form                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Product Store (shopfront-db)                                 │
//! │  ├── Price coerced to a finite number (sign NOT checked)               │
//! │  └── Non-empty primary key                                             │
//! │                                                                         │
//! │  The store accepts anything the form would reject except a             │
//! │  non-numeric price or an empty id.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::validation::validate_product_name;
//!
//! assert!(validate_product_name("Portable Bluetooth Speaker").is_ok());
//! assert!(validate_product_name("   ").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{PriceInput, ProductFormData};
use crate::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Image extensions the form accepts.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

// =============================================================================
// String Validators
// =============================================================================

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required("name", name)?;

    if name.trim().chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    required("description", description)?;

    if description.trim().chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a category label. Any non-blank label is accepted.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    required("category", category)
}

/// Validates an image URL.
///
/// ## Rules
/// - Must not be blank
/// - `http://` or `https://` scheme (case-insensitive)
/// - Something after the scheme
/// - Ends in one of [`IMAGE_EXTENSIONS`] (case-insensitive)
///
/// ## Example
/// ```rust
/// use shopfront_core::validation::validate_image_url;
///
/// assert!(validate_image_url("https://cdn.example.com/a.WEBP").is_ok());
/// assert!(validate_image_url("/images/a.jpg").is_err());
/// ```
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    required("imageUrl", url)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "imageUrl".to_string(),
        reason: "must be an http(s) URL ending in png, jpg, jpeg, gif or webp".to_string(),
    };

    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .ok_or_else(invalid)?;

    let (stem, extension) = rest.rsplit_once('.').ok_or_else(invalid)?;
    if stem.is_empty() || !IMAGE_EXTENSIONS.contains(&extension) {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a form price.
///
/// ## Rules
/// - Must coerce to a finite number
/// - Must be strictly positive
pub fn validate_price(price: &PriceInput) -> ValidationResult<()> {
    let value = price.coerce().map_err(|_| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: "must be a number".to_string(),
    })?;

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Collects every rule violation in the form, in field order.
///
/// The form shows one message per field, so at most one error is reported
/// for each field.
pub fn form_errors(form: &ProductFormData) -> Vec<ValidationError> {
    [
        validate_product_name(&form.name),
        validate_description(&form.description),
        validate_price(&form.price),
        validate_category(&form.category),
        validate_image_url(&form.image_url),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

/// Validates a whole form, returning the first violation.
pub fn validate_product_form(form: &ProductFormData) -> ValidationResult<()> {
    match form_errors(form).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductFormData {
        ProductFormData {
            name: "Yoga Mat Non-Slip Eco-Friendly".to_string(),
            description: "Non-slip mat".to_string(),
            price: PriceInput::Number(7000.0),
            category: "Sports & Outdoors".to_string(),
            image_url: "https://cdn.example.com/yoga-mat.jpg".to_string(),
            slug: None,
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Yoga Mat").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&PriceInput::Number(0.5)).is_ok());
        assert!(validate_price(&PriceInput::from("10")).is_ok());

        assert_eq!(
            validate_price(&PriceInput::Number(0.0)),
            Err(ValidationError::MustBePositive {
                field: "price".to_string()
            })
        );
        assert!(validate_price(&PriceInput::Number(-1.0)).is_err());
        assert!(matches!(
            validate_price(&PriceInput::from("ten")),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("http://example.com/a.png").is_ok());
        assert!(validate_image_url("HTTPS://EXAMPLE.COM/A.JPEG").is_ok());
        assert!(validate_image_url("https://example.com/a.gif").is_ok());

        assert!(validate_image_url("").is_err());
        assert!(validate_image_url("ftp://example.com/a.png").is_err());
        assert!(validate_image_url("https://example.com/a.svg").is_err());
        assert!(validate_image_url("https://.png").is_err());
        assert!(validate_image_url("https://example.com/png").is_err());
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(form_errors(&valid_form()).is_empty());
        assert!(validate_product_form(&valid_form()).is_ok());
    }

    #[test]
    fn test_form_errors_reports_each_field() {
        let form = ProductFormData {
            name: " ".to_string(),
            price: PriceInput::Number(0.0),
            image_url: "not a url".to_string(),
            ..valid_form()
        };

        let fields: Vec<String> = form_errors(&form)
            .iter()
            .map(|err| err.field().to_string())
            .collect();
        assert_eq!(fields, vec!["name", "price", "imageUrl"]);

        assert_eq!(
            validate_product_form(&form),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }
}
