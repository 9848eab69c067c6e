//! # Field Selection
//!
//! Maps the field names a caller asks for onto the storage work needed to
//! answer them.
//!
//! ## Mapping Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductField        Source                                             │
//! │  ─────────────────   ────────────────────────────────────────────────   │
//! │  id (productId)      product.id            (always projected)           │
//! │  title               product.title                                      │
//! │  sku                 product.sku                                        │
//! │  description         product.description                                │
//! │  price               product.price                                      │
//! │  created             product.created                                    │
//! │  lastUpdated         product.last_updated                               │
//! │  barcodes            product_barcode       (sub-fetch)                  │
//! │  attributes          product_attribute     (sub-fetch)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mapping is a `match` over closed enums, so adding a field without
//! deciding where it comes from does not compile. Names are checked by
//! [`crate::validation::parse_fields`]; this module only maps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Product Field
// =============================================================================

/// A logical field of [`crate::Product`] that a caller can ask for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ProductField {
    #[serde(alias = "productId")]
    Id,
    Title,
    Sku,
    Barcodes,
    Description,
    Price,
    Created,
    LastUpdated,
    Attributes,
}

impl ProductField {
    /// Every field, in declaration order.
    pub const ALL: [ProductField; 9] = [
        ProductField::Id,
        ProductField::Title,
        ProductField::Sku,
        ProductField::Barcodes,
        ProductField::Description,
        ProductField::Price,
        ProductField::Created,
        ProductField::LastUpdated,
        ProductField::Attributes,
    ];

    /// Wire name of the field.
    pub const fn name(self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Title => "title",
            ProductField::Sku => "sku",
            ProductField::Barcodes => "barcodes",
            ProductField::Description => "description",
            ProductField::Price => "price",
            ProductField::Created => "created",
            ProductField::LastUpdated => "lastUpdated",
            ProductField::Attributes => "attributes",
        }
    }

    /// Where the value of this field is read from.
    pub const fn source(self) -> FieldSource {
        match self {
            ProductField::Id => FieldSource::Column(Column::Id),
            ProductField::Title => FieldSource::Column(Column::Title),
            ProductField::Sku => FieldSource::Column(Column::Sku),
            ProductField::Description => FieldSource::Column(Column::Description),
            ProductField::Price => FieldSource::Column(Column::Price),
            ProductField::Created => FieldSource::Column(Column::Created),
            ProductField::LastUpdated => FieldSource::Column(Column::LastUpdated),
            ProductField::Barcodes => FieldSource::Barcodes,
            ProductField::Attributes => FieldSource::Attributes,
        }
    }

    /// Looks a field up by wire name. `productId` is accepted for `id`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "productId" {
            return Some(ProductField::Id);
        }

        ProductField::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProductField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductField::from_name(s).ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

// =============================================================================
// Columns
// =============================================================================

/// A column of the `product` table.
///
/// Declaration order is the scan order: projections always list columns in
/// this order no matter how the fields were requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Id,
    Title,
    Sku,
    Description,
    Price,
    Created,
    LastUpdated,
}

impl Column {
    /// Every column in scan order.
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::Title,
        Column::Sku,
        Column::Description,
        Column::Price,
        Column::Created,
        Column::LastUpdated,
    ];

    /// Column name in the `product` table.
    pub const fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Title => "title",
            Column::Sku => "sku",
            Column::Description => "description",
            Column::Price => "price",
            Column::Created => "created",
            Column::LastUpdated => "last_updated",
        }
    }
}

/// Where a [`ProductField`] is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A column of the parent table.
    Column(Column),
    /// Rows of `product_barcode`.
    Barcodes,
    /// Rows of `product_attribute`.
    Attributes,
}

// =============================================================================
// Field Selection
// =============================================================================

/// The resolved storage work for a set of requested fields.
///
/// ## Usage
/// ```rust
/// use shelf_core::fields::{FieldSelection, ProductField};
///
/// // Nothing requested means everything
/// let all = FieldSelection::resolve(&[]);
/// assert_eq!(all, FieldSelection::all());
///
/// let titles = FieldSelection::resolve(&[ProductField::Title]);
/// assert_eq!(titles.columns().len(), 2); // id + title
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    columns: Vec<Column>,
    barcodes: bool,
    attributes: bool,
}

impl FieldSelection {
    /// Full projection: every column and both sub-fetches.
    pub fn all() -> Self {
        FieldSelection {
            columns: Column::ALL.to_vec(),
            barcodes: true,
            attributes: true,
        }
    }

    /// Resolves requested fields into columns and sub-fetch flags.
    ///
    /// An empty slice selects everything. The identifier column is always
    /// part of the projection because rows are grouped by it.
    pub fn resolve(fields: &[ProductField]) -> Self {
        if fields.is_empty() {
            return FieldSelection::all();
        }

        let mut wanted = [false; 7];
        wanted[Column::Id as usize] = true;

        let mut barcodes = false;
        let mut attributes = false;

        for field in fields {
            match field.source() {
                FieldSource::Column(column) => wanted[column as usize] = true,
                FieldSource::Barcodes => barcodes = true,
                FieldSource::Attributes => attributes = true,
            }
        }

        let columns = Column::ALL
            .into_iter()
            .filter(|column| wanted[*column as usize])
            .collect();

        FieldSelection {
            columns,
            barcodes,
            attributes,
        }
    }

    /// Parent-table columns to project, in scan order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether the column is part of the projection.
    pub fn includes(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Whether the barcode sub-fetch is needed.
    pub fn wants_barcodes(&self) -> bool {
        self.barcodes
    }

    /// Whether the attribute sub-fetch is needed.
    pub fn wants_attributes(&self) -> bool {
        self.attributes
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        FieldSelection::all()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_selects_everything() {
        let selection = FieldSelection::resolve(&[]);

        assert_eq!(selection.columns(), &Column::ALL);
        assert!(selection.wants_barcodes());
        assert!(selection.wants_attributes());
    }

    #[test]
    fn test_columns_follow_scan_order() {
        let selection = FieldSelection::resolve(&[
            ProductField::LastUpdated,
            ProductField::Title,
            ProductField::Price,
        ]);

        assert_eq!(
            selection.columns(),
            &[Column::Id, Column::Title, Column::Price, Column::LastUpdated]
        );
    }

    #[test]
    fn test_id_is_always_projected() {
        let selection = FieldSelection::resolve(&[ProductField::Barcodes]);

        assert_eq!(selection.columns(), &[Column::Id]);
        assert!(selection.wants_barcodes());
        assert!(!selection.wants_attributes());
    }

    #[test]
    fn test_repeated_fields_collapse() {
        let selection = FieldSelection::resolve(&[
            ProductField::Sku,
            ProductField::Sku,
            ProductField::Attributes,
            ProductField::Attributes,
        ]);

        assert_eq!(selection.columns(), &[Column::Id, Column::Sku]);
        assert!(selection.wants_attributes());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in ProductField::ALL {
            assert_eq!(field.name().parse::<ProductField>(), Ok(field));
        }

        assert_eq!("productId".parse::<ProductField>(), Ok(ProductField::Id));
        assert_eq!(
            "last_updated".parse::<ProductField>(),
            Err(ValidationError::UnknownField("last_updated".to_string()))
        );
    }

    #[test]
    fn test_field_deserializes_from_wire_name() {
        let fields: Vec<ProductField> =
            serde_json::from_str(r#"["productId", "lastUpdated", "barcodes"]"#).unwrap();

        assert_eq!(
            fields,
            vec![
                ProductField::Id,
                ProductField::LastUpdated,
                ProductField::Barcodes
            ]
        );
    }
}
