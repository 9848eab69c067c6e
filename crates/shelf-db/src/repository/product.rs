//! # Product Repository
//!
//! Database operations for products and their child collections.
//!
//! ## Key Operations
//! - Sparse-field reads: only requested columns and child tables are touched
//! - Paginated listing with exact SKU / barcode filters and a total count
//! - Transactional create / update / delete (see [`super::writer`])
//! - Ownership lookups used by uniqueness pre-checks
//!
//! ## Read Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  requested fields ──► FieldSelection::resolve                          │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                  query::select_* (parameterized)                        │
//! │                            │                                            │
//! │            ┌───────────────┴───────────────┐                            │
//! │            ▼                               ▼                            │
//! │   FetchStrategy::Auxiliary        FetchStrategy::Join                   │
//! │   parents, then IN (...) per      one joined result set                 │
//! │   child table                            │                              │
//! │            │                             ▼                              │
//! │   merge_barcodes /                JoinCollapser                         │
//! │   merge_attributes                       │                              │
//! │            └───────────────┬─────────────┘                              │
//! │                            ▼                                            │
//! │                     Vec<Product>                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any row that fails to decode aborts the whole read; a partial product
//! list is never returned. A list runs its count and its page reads inside
//! one read transaction, so `total` and the page see the same snapshot.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

use shelf_core::{
    Column, FieldSelection, NewProduct, Product, ProductAttribute, ProductBarcode, ProductField,
    ProductId, ProductPage, ProductPatch, ProductQuery, ProductSku,
};

use super::collapse::{self, FetchStrategy, JoinCollapser, JoinedRow};
use super::query::{
    self, ProductFilter, Statement, Window, ATTRIBUTE_NAME_ALIAS, ATTRIBUTE_VALUE_ALIAS,
    BARCODE_ALIAS,
};
use super::writer::ProductWriter;
use crate::error::{DbError, DbResult};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let id = repo.create_product(&new_product).await?;
/// let product = repo.get_product(id, &[ProductField::Sku]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    strategy: FetchStrategy,
}

impl ProductRepository {
    /// Creates a new ProductRepository using the auxiliary fetch strategy.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository {
            pool,
            strategy: FetchStrategy::default(),
        }
    }

    /// Switches how child collections are fetched.
    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> FetchStrategy {
        self.strategy
    }

    fn writer(&self) -> ProductWriter {
        ProductWriter::new(self.pool.clone())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lists one page of products plus the number of products matching the
    /// filters.
    ///
    /// ## Arguments
    /// * `query` - Offset/limit window, optional exact SKU and barcode
    ///   filters, requested fields (empty means all)
    pub async fn list_products(&self, query: &ProductQuery) -> DbResult<ProductPage> {
        let selection = FieldSelection::resolve(&query.fields);
        let filter = ProductFilter::from_query(query);

        debug!(
            offset = query.offset,
            limit = query.limit,
            sku = ?query.sku,
            barcode = ?query.barcode,
            strategy = %self.strategy,
            "Listing products"
        );

        let mut tx = self.pool.begin().await?;

        let row = query::count_products(&filter)
            .query()?
            .fetch_one(&mut *tx)
            .await?;
        let total: i64 = get(&row, "total")?;

        let products = self
            .fetch(
                &mut tx,
                &selection,
                &filter,
                Some(Window::new(query.offset, query.limit)),
            )
            .await?;

        tx.commit().await?;

        debug!(count = products.len(), total, "Listed products");

        Ok(ProductPage {
            products,
            total: u32::try_from(total).unwrap_or(u32::MAX),
        })
    }

    /// Gets a product by id with only the requested fields populated.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_product(
        &self,
        id: ProductId,
        fields: &[ProductField],
    ) -> DbResult<Option<Product>> {
        debug!(id, ?fields, "Getting product");

        let selection = FieldSelection::resolve(fields);
        let mut conn = self.pool.acquire().await?;
        let products = self
            .fetch(&mut conn, &selection, &ProductFilter::by_id(id), None)
            .await?;

        Ok(products.into_iter().next())
    }

    /// Returns the product owning `sku`, if any.
    pub async fn find_by_sku(&self, sku: &str) -> DbResult<Option<ProductSku>> {
        let statement = query::select_sku_owner(sku);

        let Some(row) = statement.query()?.fetch_optional(&self.pool).await? else {
            return Ok(None);
        };

        Ok(Some(ProductSku {
            product_id: decode_id(&row, "id")?,
            sku: get(&row, "sku")?,
        }))
    }

    /// Returns the owner of every listed barcode that exists, ordered by
    /// owner then barcode.
    ///
    /// An empty list returns an empty result without touching the database.
    pub async fn find_by_barcodes(&self, barcodes: &[String]) -> DbResult<Vec<ProductBarcode>> {
        let statements = query::select_barcode_owners(barcodes);
        if statements.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.acquire().await?;
        let mut owners = fetch_barcode_rows(&mut conn, &statements).await?;

        if statements.len() > 1 {
            owners.sort_by(|a, b| (a.product_id, &a.barcode).cmp(&(b.product_id, &b.barcode)));
        }

        Ok(owners)
    }

    /// Checks whether a product row exists.
    pub async fn product_exists(&self, id: ProductId) -> DbResult<bool> {
        let row = query::select_exists(id)
            .query()?
            .fetch_one(&self.pool)
            .await?;

        let found: i64 = get(&row, "found")?;
        Ok(found != 0)
    }

    /// Counts all products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let row = query::count_products(&ProductFilter::default())
            .query()?
            .fetch_one(&self.pool)
            .await?;

        get(&row, "total")
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a product with its children and returns the generated id.
    pub async fn create_product(&self, product: &NewProduct) -> DbResult<ProductId> {
        self.writer().create(product).await
    }

    /// Applies a partial update. Fails with `NotFound` for a missing id.
    pub async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> DbResult<()> {
        self.writer().update(id, patch).await
    }

    /// Deletes a product across all tables; returns whether it existed.
    pub async fn delete_product(&self, id: ProductId) -> DbResult<bool> {
        self.writer().delete(id).await
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    async fn fetch(
        &self,
        conn: &mut SqliteConnection,
        selection: &FieldSelection,
        filter: &ProductFilter,
        window: Option<Window>,
    ) -> DbResult<Vec<Product>> {
        match self.strategy {
            FetchStrategy::Auxiliary => fetch_auxiliary(conn, selection, filter, window).await,
            FetchStrategy::Join => fetch_joined(conn, selection, filter, window).await,
        }
    }
}

// =============================================================================
// Fetch Strategies
// =============================================================================

async fn fetch_auxiliary(
    conn: &mut SqliteConnection,
    selection: &FieldSelection,
    filter: &ProductFilter,
    window: Option<Window>,
) -> DbResult<Vec<Product>> {
    let statement = query::select_products(selection, filter, window);
    let rows = statement.query()?.fetch_all(&mut *conn).await?;

    let mut products = rows
        .iter()
        .map(|row| decode_product(row, selection))
        .collect::<DbResult<Vec<_>>>()?;

    let ids: Vec<ProductId> = products.iter().map(|product| product.id).collect();

    if selection.wants_barcodes() {
        let rows = fetch_barcode_rows(conn, &query::select_barcodes_for(&ids)).await?;
        collapse::merge_barcodes(&mut products, rows);
    }

    if selection.wants_attributes() {
        let rows = fetch_attribute_rows(conn, &query::select_attributes_for(&ids)).await?;
        collapse::merge_attributes(&mut products, rows);
    }

    Ok(products)
}

async fn fetch_joined(
    conn: &mut SqliteConnection,
    selection: &FieldSelection,
    filter: &ProductFilter,
    window: Option<Window>,
) -> DbResult<Vec<Product>> {
    let statement = query::select_joined(selection, filter, window);
    let rows = statement.query()?.fetch_all(&mut *conn).await?;

    debug!(rows = rows.len(), "Collapsing joined rows");

    let mut collapser =
        JoinCollapser::new(selection.wants_barcodes(), selection.wants_attributes());

    for row in &rows {
        collapser.push(decode_joined(row, selection)?);
    }

    Ok(collapser.finish())
}

/// Runs every chunk and concatenates the decoded rows.
pub(super) async fn fetch_barcode_rows(
    conn: &mut SqliteConnection,
    statements: &[Statement],
) -> DbResult<Vec<ProductBarcode>> {
    let mut barcodes = Vec::new();

    for statement in statements {
        let rows = statement.query()?.fetch_all(&mut *conn).await?;

        for row in &rows {
            barcodes.push(ProductBarcode {
                product_id: decode_id(row, "product_id")?,
                barcode: get(row, "barcode")?,
            });
        }
    }

    Ok(barcodes)
}

async fn fetch_attribute_rows(
    conn: &mut SqliteConnection,
    statements: &[Statement],
) -> DbResult<Vec<(ProductId, ProductAttribute)>> {
    let mut attributes = Vec::new();

    for statement in statements {
        let rows = statement.query()?.fetch_all(&mut *conn).await?;

        for row in &rows {
            attributes.push((
                decode_id(row, "product_id")?,
                ProductAttribute::new(get::<String>(row, "name")?, get::<String>(row, "value")?),
            ));
        }
    }

    Ok(attributes)
}

// =============================================================================
// Row Decoding
// =============================================================================

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> DbResult<T>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column).map_err(|e| DbError::decode(column, e))
}

fn decode_id(row: &SqliteRow, column: &str) -> DbResult<ProductId> {
    let raw: i64 = get(row, column)?;

    ProductId::try_from(raw)
        .map_err(|_| DbError::decode(column, format!("{raw} does not fit a product id")))
}

/// Builds a product from the selected parent columns of a row.
fn decode_product(row: &SqliteRow, selection: &FieldSelection) -> DbResult<Product> {
    let mut product = Product::with_id(decode_id(row, Column::Id.name())?);

    for &column in selection.columns() {
        let name = column.name();

        match column {
            Column::Id => {}
            Column::Title => product.title = Some(get(row, name)?),
            Column::Sku => product.sku = Some(get(row, name)?),
            Column::Description => product.description = get(row, name)?,
            Column::Price => product.price = Some(get(row, name)?),
            Column::Created => product.created = Some(get::<DateTime<Utc>>(row, name)?),
            Column::LastUpdated => product.last_updated = get(row, name)?,
        }
    }

    Ok(product)
}

/// Splits a joined row into its parent and child payloads.
fn decode_joined(row: &SqliteRow, selection: &FieldSelection) -> DbResult<JoinedRow> {
    let product = decode_product(row, selection)?;

    let barcode = if selection.wants_barcodes() {
        get(row, BARCODE_ALIAS)?
    } else {
        None
    };

    let attribute = if selection.wants_attributes() {
        let name: Option<String> = get(row, ATTRIBUTE_NAME_ALIAS)?;
        let value: Option<String> = get(row, ATTRIBUTE_VALUE_ALIAS)?;
        name.zip(value).map(|(name, value)| ProductAttribute::new(name, value))
    } else {
        None
    };

    Ok(JoinedRow {
        product,
        barcode,
        attribute,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
