//! # Domain Types
//!
//! Core domain types used throughout Shelf.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐                                               │
//! │  │      Product         │ ◄── aggregate root (table: product)           │
//! │  │  ──────────────────  │                                               │
//! │  │  id (u32)            │     ┌────────────────────┐                    │
//! │  │  title, sku, price   │────►│  barcodes          │ product_barcode    │
//! │  │  description?        │     └────────────────────┘                    │
//! │  │  created, updated?   │     ┌────────────────────┐                    │
//! │  │                      │────►│  ProductAttribute  │ product_attribute  │
//! │  └──────────────────────┘     └────────────────────┘                    │
//! │                                                                         │
//! │  Write inputs:  NewProduct (create)   ProductPatch (partial update)     │
//! │  Read inputs:   ProductQuery (list)   ProductField (projection)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Absent vs Empty
//! Every `Product` field other than `id` is optional: a field that was not
//! requested stays `None`. Child collections in a [`ProductPatch`] use
//! [`ChildUpdate`], which tells "leave untouched" apart from "replace with
//! this (possibly empty) set".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::fields::ProductField;

/// Storage-generated product identifier.
pub type ProductId = u32;

// =============================================================================
// Product Attribute
// =============================================================================

/// A name/value pair attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductAttribute {
    pub name: String,
    pub value: String,
}

impl ProductAttribute {
    /// Creates a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        ProductAttribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive identity, used when rejecting duplicate input.
    pub fn normalized_key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.value.to_lowercase())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by reads.
///
/// Only the requested fields are populated; `id` is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier generated by storage.
    #[serde(rename = "productId")]
    pub id: ProductId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Stock Keeping Unit, unique across all products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcodes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Decimal price kept as the exact string it was written with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Set once, at insert time. Serialized as Unix seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    #[ts(as = "Option<i64>")]
    pub created: Option<DateTime<Utc>>,

    /// Set on every update, absent until the first one.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    #[ts(as = "Option<i64>")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<ProductAttribute>>,
}

impl Product {
    /// Creates a product with only the identifier populated.
    pub fn with_id(id: ProductId) -> Self {
        Product {
            id,
            ..Product::default()
        }
    }
}

// =============================================================================
// Lookup Results
// =============================================================================

/// Owner of a SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSku {
    pub product_id: ProductId,
    pub sku: String,
}

/// Owner of a barcode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductBarcode {
    pub product_id: ProductId,
    pub barcode: String,
}

// =============================================================================
// Write Inputs
// =============================================================================

/// Input for creating a product together with its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub title: String,
    pub sku: String,
    pub price: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub barcodes: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
}

/// Three-valued update of a child collection.
///
/// ```text
/// JSON input            ChildUpdate            Effect
/// ───────────────────   ────────────────────   ─────────────────────────
/// key missing / null    Keep                   rows untouched
/// []                    Replace(vec![])        all rows deleted
/// ["a", "b"]            Replace(vec![a, b])    rows deleted, a + b inserted
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildUpdate<T> {
    /// Leave the stored collection as it is.
    Keep,
    /// Replace the stored collection with exactly these members.
    Replace(Vec<T>),
}

impl<T> ChildUpdate<T> {
    /// Returns true when the collection is left untouched.
    pub fn is_keep(&self) -> bool {
        matches!(self, ChildUpdate::Keep)
    }

    /// Returns the replacement members, if any were supplied.
    pub fn replacement(&self) -> Option<&[T]> {
        match self {
            ChildUpdate::Keep => None,
            ChildUpdate::Replace(items) => Some(items.as_slice()),
        }
    }
}

impl<T> Default for ChildUpdate<T> {
    fn default() -> Self {
        ChildUpdate::Keep
    }
}

impl<T> From<Option<Vec<T>>> for ChildUpdate<T> {
    fn from(value: Option<Vec<T>>) -> Self {
        match value {
            Some(items) => ChildUpdate::Replace(items),
            None => ChildUpdate::Keep,
        }
    }
}

impl<T: Serialize> Serialize for ChildUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.replacement().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ChildUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Vec<T>>::deserialize(deserializer).map(ChildUpdate::from)
    }
}

/// Partial update of a product.
///
/// Scalar fields are written only when present. `last_updated` is always
/// stamped, even when nothing else changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Missing key: keep the stored barcodes.
    #[serde(default, skip_serializing_if = "ChildUpdate::is_keep")]
    #[ts(as = "Option<Vec<String>>", optional)]
    pub barcodes: ChildUpdate<String>,
    #[serde(default, skip_serializing_if = "ChildUpdate::is_keep")]
    #[ts(as = "Option<Vec<ProductAttribute>>", optional)]
    pub attributes: ChildUpdate<ProductAttribute>,
}

// =============================================================================
// Read Inputs
// =============================================================================

/// Parameters of a multi-product read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub offset: u64,
    pub limit: u64,
    /// Exact-match SKU filter.
    pub sku: Option<String>,
    /// Exact-match barcode filter.
    pub barcode: Option<String>,
    /// Requested fields; empty means all.
    pub fields: Vec<ProductField>,
}

impl ProductQuery {
    /// Creates a query for one page with no filters.
    pub fn page(offset: u64, limit: u64) -> Self {
        ProductQuery {
            offset,
            limit,
            ..ProductQuery::default()
        }
    }

    /// Restricts the query to products with this SKU.
    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Restricts the query to products carrying this barcode.
    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Limits the projection to these fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = ProductField>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }
}

/// One page of products plus the number of products matching the filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Matching products regardless of offset/limit.
    pub total: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================
