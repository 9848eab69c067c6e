//! # Validation Module
//!
//! Input validation for product writes and read projections.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Types, required keys                                              │
//! │  └── Absent vs empty child collections                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: shelf-service                                                │
//! │  ├── THIS MODULE: lengths, price range, duplicate members              │
//! │  └── Uniqueness pre-checks against stored SKUs / barcodes              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraints (sku, barcode)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::validation::{validate_sku, validate_price};
//!
//! validate_sku("MUG-1").unwrap();
//! validate_price("9.99").unwrap();
//! assert!(validate_price("-1").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::fields::ProductField;
use crate::types::{NewProduct, ProductAttribute, ProductPatch};
use crate::{
    MAX_ATTRIBUTE_NAME_LEN, MAX_ATTRIBUTE_VALUE_LEN, MAX_BARCODE_LEN, MAX_DESCRIPTION_LEN,
    MAX_PRICE, MAX_SKU_LEN, MAX_TITLE_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_length(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    check_length("title", title, MAX_TITLE_LEN)
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_sku;
///
/// assert!(validate_sku("MUG-1").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(40).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    check_length("sku", sku, MAX_SKU_LEN)
}

/// Validates a product description (at most 1024 characters).
pub fn validate_description(description: &str) -> ValidationResult<()> {
    check_length("description", description, MAX_DESCRIPTION_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a decimal price string.
///
/// ## Rules
/// - Plain decimal notation: digits with an optional fractional part
/// - Between 0 and 10,000,000 inclusive
///
/// The string is stored exactly as given, so `"9.90"` reads back as
/// `"9.90"`.
pub fn validate_price(price: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: format!("'{}' is not a valid decimal", price),
    };

    let amount: f64 = price.parse().map_err(|_| invalid())?;

    if !amount.is_finite() {
        return Err(invalid());
    }

    if amount < 0.0 || amount > MAX_PRICE as f64 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    // f64 parsing also accepts "1e3", "+5" and ".5"
    let (whole, fraction) = match price.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (price, None),
    };

    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if !digits(whole) || fraction.is_some_and(|f| !digits(f)) {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a barcode list.
///
/// ## Rules
/// - Each barcode is non-empty and at most 32 characters
/// - No barcode appears twice
pub fn validate_barcodes(barcodes: &[String]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(barcodes.len());

    for barcode in barcodes {
        if barcode.is_empty() {
            return Err(ValidationError::Required {
                field: "barcode".to_string(),
            });
        }

        check_length("barcode", barcode, MAX_BARCODE_LEN)?;

        if !seen.insert(barcode.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "barcodes".to_string(),
                value: barcode.clone(),
            });
        }
    }

    Ok(())
}

/// Validates an attribute list.
///
/// ## Rules
/// - Names are 1..=16 characters, values at most 32
/// - No two attributes share the same case-insensitive (name, value)
pub fn validate_attributes(attributes: &[ProductAttribute]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(attributes.len());

    for attribute in attributes {
        if attribute.name.is_empty() {
            return Err(ValidationError::Required {
                field: "attribute name".to_string(),
            });
        }

        check_length("attribute name", &attribute.name, MAX_ATTRIBUTE_NAME_LEN)?;
        check_length("attribute value", &attribute.value, MAX_ATTRIBUTE_VALUE_LEN)?;

        if !seen.insert(attribute.normalized_key()) {
            return Err(ValidationError::Duplicate {
                field: "attributes".to_string(),
                value: format!("{}={}", attribute.name, attribute.value),
            });
        }
    }

    Ok(())
}

/// Parses requested field names.
///
/// ## Example
/// ```rust
/// use shelf_core::validation::parse_fields;
/// use shelf_core::ProductField;
///
/// let fields = parse_fields(&["sku", "barcodes"]).unwrap();
/// assert_eq!(fields, vec![ProductField::Sku, ProductField::Barcodes]);
///
/// assert!(parse_fields(&["colour"]).is_err());
/// ```
pub fn parse_fields<S: AsRef<str>>(names: &[S]) -> ValidationResult<Vec<ProductField>> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates a complete create input.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_title(&product.title)?;
    validate_sku(&product.sku)?;
    validate_price(&product.price)?;

    if let Some(description) = &product.description {
        validate_description(description)?;
    }

    validate_barcodes(&product.barcodes)?;
    validate_attributes(&product.attributes)
}

/// Validates the fields present in a partial update.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }

    if let Some(sku) = &patch.sku {
        validate_sku(sku)?;
    }

    if let Some(price) = &patch.price {
        validate_price(price)?;
    }

    if let Some(description) = &patch.description {
        validate_description(description)?;
    }

    if let Some(barcodes) = patch.barcodes.replacement() {
        validate_barcodes(barcodes)?;
    }

    if let Some(attributes) = patch.attributes.replacement() {
        validate_attributes(attributes)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
