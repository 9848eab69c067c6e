//! # shelf-core: Pure Domain Logic for Shelf
//!
//! This crate holds the product catalog's domain model and every rule that
//! can be expressed without touching storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 shelf-service (Service layer)                   │   │
//! │  │    list_products, get_product, create_product, ...              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────────┐  ┌───────────┐              │   │
//! │  │   │   types   │  │    fields     │  │ validation│              │   │
//! │  │   │  Product  │  │ ProductField  │  │   rules   │              │   │
//! │  │   │  Patch    │  │ FieldSelection│  │  checks   │              │   │
//! │  │   └───────────┘  └───────────────┘  └───────────┘              │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shelf-db (Database Layer)                    │   │
//! │  │        query builder, row collapsing, transactional writes      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, ProductPatch, ...)
//! - [`fields`] - Requested field names and their column mapping
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::fields::{Column, FieldSelection, ProductField};
//!
//! let selection = FieldSelection::resolve(&[ProductField::Sku, ProductField::Barcodes]);
//!
//! // The identifier is always projected
//! assert_eq!(selection.columns(), &[Column::Id, Column::Sku]);
//! assert!(selection.wants_barcodes());
//! assert!(!selection.wants_attributes());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fields;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use fields::{Column, FieldSelection, ProductField};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a list request asks for zero products.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Maximum length of a product title.
pub const MAX_TITLE_LEN: usize = 32;

/// Maximum length of a SKU.
pub const MAX_SKU_LEN: usize = 32;

/// Maximum length of a product description.
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Maximum length of a single barcode.
pub const MAX_BARCODE_LEN: usize = 32;

/// Maximum length of an attribute name.
pub const MAX_ATTRIBUTE_NAME_LEN: usize = 16;

/// Maximum length of an attribute value.
pub const MAX_ATTRIBUTE_VALUE_LEN: usize = 32;

/// Upper bound for a product price (inclusive).
pub const MAX_PRICE: i64 = 10_000_000;
