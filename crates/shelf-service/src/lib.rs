//! # shelf-service: Product Operations for Shelf
//!
//! The layer a transport (HTTP handler, CLI, ...) talks to. It validates
//! input, runs the SKU and barcode uniqueness checks, tags every call with a
//! request id, and turns all failures into a [`ServiceError`] with a code
//! and a message that is safe to show to a client.
//!
//! ## Modules
//!
//! - [`service`] - `ProductService` and its list/get/create/update/delete calls
//! - [`context`] - Per-call request id
//! - [`error`] - Error codes returned to callers
//! - [`config`] - Environment configuration
//! - [`telemetry`] - Logging bootstrap
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelf_service::{init_tracing, ListRequest, ProductService, RequestContext, ShelfConfig};
//!
//! init_tracing();
//!
//! let config = ShelfConfig::load()?;
//! let db = config.open_database().await?;
//! let service = ProductService::new(db.products())
//!     .with_default_page_size(config.default_page_size);
//!
//! let page = service
//!     .list_products(&RequestContext::new(), ListRequest::default())
//!     .await?;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::{ConfigError, ShelfConfig};
pub use context::RequestContext;
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use service::{ListRequest, ProductService};
pub use telemetry::init_tracing;
