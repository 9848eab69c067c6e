//! # Repository Module
//!
//! Product storage for Shelf, split by concern.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductService (shelf-service)                                        │
//! │       │                                                                 │
//! │       │  repo.list_products(&query)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository (product.rs)   public contract                      │
//! │  ├── reads ───► query.rs     parameterized statements                  │
//! │  │              collapse.rs  rows → products with child collections    │
//! │  └── writes ──► writer.rs    one transaction per create/update/delete  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite: product, product_barcode, product_attribute                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Types
//!
//! - [`ProductRepository`](product::ProductRepository) - Reads, writes and lookups
//! - [`ProductWriter`](writer::ProductWriter) - Transactional multi-table writes
//! - [`FetchStrategy`](collapse::FetchStrategy) - Auxiliary queries or a single join

pub mod collapse;
pub mod product;
pub mod query;
pub mod writer;
