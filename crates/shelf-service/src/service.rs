//! # Product Service
//!
//! Request-level product operations.
//!
//! ## Write Checks
//! ```text
//! create:  validate ─► SKU free? ─► barcodes free? ─► insert (one tx)
//! update:  exists? ─► validate ─► SKU free or ours? ─► barcodes free or ours? ─► update (one tx)
//! delete:  delete (one tx) ─► existed?
//! ```
//!
//! The pre-checks give the caller a precise conflict message. A concurrent
//! writer can still win between check and write; the database UNIQUE
//! constraints then reject the write and it surfaces as `CONFLICT` too.

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use shelf_core::validation::{parse_fields, validate_new_product, validate_product_patch};
use shelf_core::{
    CoreError, NewProduct, Product, ProductId, ProductPage, ProductPatch, ProductQuery,
    DEFAULT_PAGE_SIZE,
};
use shelf_db::ProductRepository;

use crate::context::RequestContext;
use crate::error::{ServiceError, ServiceResult};

/// Parameters of a list call as they arrive from a client.
///
/// Empty `sku` / `barcode` strings mean "no filter" and a zero `limit`
/// means the default page size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListRequest {
    pub offset: u64,
    pub limit: u64,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub fields: Vec<String>,
}

/// Product operations with validation and uniqueness checks.
#[derive(Debug, Clone)]
pub struct ProductService {
    repo: ProductRepository,
    default_page_size: u32,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        ProductService {
            repo,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Overrides the page size used for `limit == 0`.
    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    #[instrument(skip(self, ctx, request), fields(request_id = %ctx.request_id))]
    pub async fn list_products(
        &self,
        ctx: &RequestContext,
        request: ListRequest,
    ) -> ServiceResult<ProductPage> {
        let fields = parse_fields(&request.fields).map_err(reject)?;

        let limit = match request.limit {
            0 => u64::from(self.default_page_size),
            n => n,
        };

        let mut query = ProductQuery::page(request.offset, limit).fields(fields);
        query.sku = non_empty(request.sku);
        query.barcode = non_empty(request.barcode);

        let page = self.repo.list_products(&query).await?;

        debug!(count = page.products.len(), total = page.total, "Products listed");
        Ok(page)
    }

    #[instrument(skip(self, ctx, requested), fields(request_id = %ctx.request_id))]
    pub async fn get_product(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        requested: Vec<String>,
    ) -> ServiceResult<Product> {
        let fields = parse_fields(&requested).map_err(reject)?;

        self.repo
            .get_product(id, &fields)
            .await?
            .ok_or_else(|| reject(CoreError::ProductNotFound(id)))
    }

    /// Creates a product and returns its id.
    #[instrument(skip(self, ctx, product), fields(request_id = %ctx.request_id, sku = %product.sku))]
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        product: NewProduct,
    ) -> ServiceResult<ProductId> {
        validate_new_product(&product).map_err(reject)?;

        if self.repo.find_by_sku(&product.sku).await?.is_some() {
            return Err(reject(CoreError::SkuAlreadyExists(product.sku)));
        }

        let taken: Vec<String> = self
            .repo
            .find_by_barcodes(&product.barcodes)
            .await?
            .into_iter()
            .map(|owner| owner.barcode)
            .collect();

        if !taken.is_empty() {
            return Err(reject(CoreError::BarcodesNotUnique(taken)));
        }

        let id = self.repo.create_product(&product).await?;

        info!(id, sku = %product.sku, "Product created");
        Ok(id)
    }

    #[instrument(skip(self, ctx, patch), fields(request_id = %ctx.request_id))]
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        patch: ProductPatch,
    ) -> ServiceResult<()> {
        if !self.repo.product_exists(id).await? {
            return Err(reject(CoreError::ProductNotFound(id)));
        }

        validate_product_patch(&patch).map_err(reject)?;

        if let Some(sku) = &patch.sku {
            if let Some(owner) = self.repo.find_by_sku(sku).await? {
                if owner.product_id != id {
                    return Err(reject(CoreError::SkuAlreadyExists(owner.sku)));
                }
            }
        }

        if let Some(barcodes) = patch.barcodes.replacement() {
            let taken: Vec<String> = self
                .repo
                .find_by_barcodes(barcodes)
                .await?
                .into_iter()
                .filter(|owner| owner.product_id != id)
                .map(|owner| owner.barcode)
                .collect();

            if !taken.is_empty() {
                return Err(reject(CoreError::BarcodesNotUnique(taken)));
            }
        }

        self.repo.update_product(id, &patch).await?;

        info!(id, "Product updated");
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id))]
    pub async fn delete_product(&self, ctx: &RequestContext, id: ProductId) -> ServiceResult<()> {
        if !self.repo.delete_product(id).await? {
            return Err(reject(CoreError::ProductNotFound(id)));
        }

        info!(id, "Product deleted");
        Ok(())
    }
}

/// Converts a client-side failure, logging it at warn.
fn reject(err: impl Into<ServiceError>) -> ServiceError {
    let err = err.into();
    warn!(code = ?err.code, message = %err.message, "Request rejected");
    err
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_request_defaults() {
        let request: ListRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, ListRequest::default());

        let request: ListRequest =
            serde_json::from_str(r#"{"limit": 5, "sku": "", "fields": ["sku"]}"#).unwrap();
        assert_eq!(request.limit, 5);
        assert_eq!(non_empty(request.sku), None);
        assert_eq!(request.fields, vec!["sku".to_string()]);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("111".to_string())).as_deref(), Some("111"));
    }
}
