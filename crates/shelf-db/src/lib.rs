//! # shelf-db: Database Layer for Shelf
//!
//! This crate provides product storage on SQLite with sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Data Flow                                │
//! │                                                                         │
//! │  ProductService::list_products                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shelf-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (repository/) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ query         │    │ 001_product_ │  │   │
//! │  │   │ Connection    │    │ collapse      │    │   schema.sql │  │   │
//! │  │   │ Management    │    │ writer        │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: product, product_barcode, product_attribute            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema script
//! - [`error`] - Database error types
//! - [`repository`] - Statement building, row collapsing, transactional writes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelf_core::{NewProduct, ProductField, ProductQuery};
//! use shelf_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/shelf.db")).await?;
//!
//! let id = db.products().create_product(&new_product).await?;
//! let page = db
//!     .products()
//!     .list_products(&ProductQuery::page(0, 10).fields([ProductField::Sku]))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::collapse::FetchStrategy;
pub use repository::product::ProductRepository;
pub use repository::writer::ProductWriter;
