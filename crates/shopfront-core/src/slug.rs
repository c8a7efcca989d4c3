//! # Slug Generation
//!
//! Turns product names into URL-friendly identifiers.
//!
//! ## Transform
//! ```text
//! "  Gardening Tool Set (5-Piece) "
//!        │ lowercase + trim
//!        ▼
//! "gardening tool set (5-piece)"
//!        │ drop everything except a-z, 0-9, whitespace, '-'
//!        ▼
//! "gardening tool set 5-piece"
//!        │ whitespace runs → '-', then '--…' → '-'
//!        ▼
//! "gardening-tool-set-5-piece"
//! ```
//!
//! Leading/trailing hyphens are kept when the input produces them
//! (e.g. `"-sale-"` stays `"-sale-"`).

/// Generates a slug from a name.
///
/// ## Example
/// ```rust
/// use shopfront_core::slug::generate_slug;
///
/// assert_eq!(generate_slug("Ray-Ban Wayfarer Classic Sunglasses"), "ray-ban-wayfarer-classic-sunglasses");
/// assert_eq!(generate_slug("Yoga Mat  --  Eco"), "yoga-mat-eco");
/// ```
pub fn generate_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());

    for c in lowered.trim_matches(is_separator).chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if is_separator(c) || c == '-' {
            // Dropped characters do not break a run, so hyphen collapsing
            // only needs to look at what has been written so far.
            if !slug.ends_with('-') {
                slug.push('-');
            }
        }
    }

    slug
}

/// Whitespace that separates words in a name.
///
/// Unicode `White_Space` plus the byte-order mark U+FEFF, minus NEL U+0085:
/// the set browsers treat as whitespace in names typed into the form.
fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Checks whether `value` is already in slug form.
pub fn is_slug(value: &str) -> bool {
    !value.is_empty() && generate_slug(value) == value
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_names() {
        assert_eq!(generate_slug("Apple Watch Series 9 GPS"), "apple-watch-series-9-gps");
        assert_eq!(
            generate_slug("Sony WH-1000XM5 Noise Cancelling Headphones"),
            "sony-wh-1000xm5-noise-cancelling-headphones"
        );
        assert_eq!(generate_slug("Gardening Tool Set (5-Piece)"), "gardening-tool-set-5-piece");
    }

    #[test]
    fn test_trims_before_stripping() {
        assert_eq!(generate_slug("   Coffee Maker   "), "coffee-maker");
        // Trailing punctuation is stripped after trimming, so the space before it survives.
        assert_eq!(generate_slug("Coffee Maker !"), "coffee-maker-");
    }

    #[test]
    fn test_collapses_whitespace_and_hyphens() {
        assert_eq!(generate_slug("a \t\n b"), "a-b");
        assert_eq!(generate_slug("a---b"), "a-b");
        assert_eq!(generate_slug("a - b"), "a-b");
        assert_eq!(generate_slug("a -!- b"), "a-b");
    }

    #[test]
    fn test_byte_order_mark_separates_words() {
        assert_eq!(generate_slug("a\u{FEFF}b"), "a-b");
        assert_eq!(generate_slug("\u{FEFF}Yoga Mat\u{FEFF}"), "yoga-mat");
        assert_eq!(generate_slug("a\u{85}b"), "ab");
    }

    #[test]
    fn test_drops_non_ascii_and_symbols() {
        assert_eq!(generate_slug("Crème Brûlée"), "crme-brle");
        assert_eq!(generate_slug("Sports & Outdoors"), "sports-outdoors");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn test_is_slug() {
        assert!(is_slug("yoga-mat"));
        assert!(!is_slug("Yoga Mat"));
        assert!(!is_slug(""));
    }
}
