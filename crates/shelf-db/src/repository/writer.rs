//! # Transactional Writer
//!
//! Multi-table product writes, each inside one transaction.
//!
//! ## Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(input)                 update(id, patch)        delete(id)      │
//! │  ─────────────────────         ──────────────────────   ─────────────── │
//! │  BEGIN                         BEGIN                    BEGIN           │
//! │  INSERT product                UPDATE product           DELETE barcodes │
//! │    (created = now)               (present columns,      DELETE attrs    │
//! │  last_insert_rowid → id           last_updated = now)   DELETE product  │
//! │  INSERT barcodes  (if any)     0 rows? → NotFound       COMMIT          │
//! │  INSERT attributes (if any)    Replace(barcodes)?                       │
//! │  COMMIT → id                     DELETE + INSERT                        │
//! │                                Replace(attributes)?                     │
//! │                                  DELETE + INSERT                        │
//! │                                COMMIT                                   │
//! │                                                                         │
//! │  Child inserts run in chunks, all inside the same transaction.         │
//! │  Any error: ROLLBACK, then return the original error                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::Utc;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, error, warn};

use shelf_core::{NewProduct, ProductAttribute, ProductId, ProductPatch};

use super::product::fetch_barcode_rows;
use super::query::{self, Statement, ATTRIBUTE_TABLE, BARCODE_TABLE};
use crate::error::{DbError, DbResult};

/// Writes products and their child rows atomically.
#[derive(Debug, Clone)]
pub struct ProductWriter {
    pool: SqlitePool,
}

impl ProductWriter {
    pub fn new(pool: SqlitePool) -> Self {
        ProductWriter { pool }
    }

    /// Inserts a product with its barcodes and attributes.
    ///
    /// ## Returns
    /// * `Ok(id)` - Generated identifier, only after commit
    /// * `Err(DbError::UniqueViolation)` - SKU or a barcode already exists
    pub async fn create(&self, product: &NewProduct) -> DbResult<ProductId> {
        debug!(sku = %product.sku, "Creating product");

        let mut tx = self.pool.begin().await?;

        match insert_product(&mut tx, product).await {
            Ok(id) => {
                tx.commit().await?;
                debug!(id, "Product created");
                Ok(id)
            }
            Err(err) => Err(rollback(tx, "create", err).await),
        }
    }

    /// Applies a partial update.
    ///
    /// Child collections are replaced only when the patch carries them.
    ///
    /// ## Returns
    /// * `Ok(())` - Update committed
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn update(&self, id: ProductId, patch: &ProductPatch) -> DbResult<()> {
        debug!(
            id,
            replace_barcodes = !patch.barcodes.is_keep(),
            replace_attributes = !patch.attributes.is_keep(),
            "Updating product"
        );

        let mut tx = self.pool.begin().await?;

        match update_product(&mut tx, id, patch).await {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(err) => Err(rollback(tx, "update", err).await),
        }
    }

    /// Deletes a product and all of its child rows.
    ///
    /// Returns whether the product row existed. Deleting a missing id is
    /// not an error here.
    pub async fn delete(&self, id: ProductId) -> DbResult<bool> {
        debug!(id, "Deleting product");

        let mut tx = self.pool.begin().await?;

        match delete_product(&mut tx, id).await {
            Ok(existed) => {
                tx.commit().await?;
                Ok(existed)
            }
            Err(err) => Err(rollback(tx, "delete", err).await),
        }
    }
}

// =============================================================================
// Transaction Bodies
// =============================================================================

async fn execute(
    tx: &mut Transaction<'_, Sqlite>,
    statement: &Statement,
) -> DbResult<SqliteQueryResult> {
    Ok(statement.query()?.execute(&mut **tx).await?)
}

async fn insert_product(
    tx: &mut Transaction<'_, Sqlite>,
    product: &NewProduct,
) -> DbResult<ProductId> {
    let result = execute(tx, &query::insert_product(product, Utc::now()))
        .await
        .map_err(|e| e.with_unique_value("sku", product.sku.as_str()))?;

    let rowid = result.last_insert_rowid();
    let id = ProductId::try_from(rowid)
        .map_err(|_| DbError::decode("id", format!("{rowid} does not fit a product id")))?;

    insert_barcodes(tx, id, &product.barcodes).await?;
    insert_attributes(tx, id, &product.attributes).await?;

    Ok(id)
}

async fn update_product(
    tx: &mut Transaction<'_, Sqlite>,
    id: ProductId,
    patch: &ProductPatch,
) -> DbResult<()> {
    let result = execute(tx, &query::update_product(id, patch, Utc::now()))
        .await
        .map_err(|e| e.with_unique_value("sku", patch.sku.as_deref().unwrap_or_default()))?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Product", id.to_string()));
    }

    if let Some(barcodes) = patch.barcodes.replacement() {
        execute(tx, &query::delete_children(BARCODE_TABLE, id)).await?;
        insert_barcodes(tx, id, barcodes).await?;
    }

    if let Some(attributes) = patch.attributes.replacement() {
        execute(tx, &query::delete_children(ATTRIBUTE_TABLE, id)).await?;
        insert_attributes(tx, id, attributes).await?;
    }

    Ok(())
}

async fn delete_product(tx: &mut Transaction<'_, Sqlite>, id: ProductId) -> DbResult<bool> {
    execute(tx, &query::delete_children(BARCODE_TABLE, id)).await?;
    execute(tx, &query::delete_children(ATTRIBUTE_TABLE, id)).await?;

    let result = execute(tx, &query::delete_product(id)).await?;

    Ok(result.rows_affected() > 0)
}

async fn insert_barcodes(
    tx: &mut Transaction<'_, Sqlite>,
    id: ProductId,
    barcodes: &[String],
) -> DbResult<()> {
    for statement in query::insert_barcodes(id, barcodes) {
        let Err(err) = execute(tx, &statement).await else {
            continue;
        };

        if !err.is_unique_violation("barcode") {
            return Err(err);
        }

        let colliding = colliding_barcodes(tx, id, barcodes).await?;
        return Err(err.with_unique_value("barcode", colliding.join(", ")));
    }

    Ok(())
}

/// Barcodes of `barcodes` that block an insert for product `id`: those owned
/// by another product, else those repeated in the input itself.
async fn colliding_barcodes(
    tx: &mut Transaction<'_, Sqlite>,
    id: ProductId,
    barcodes: &[String],
) -> DbResult<Vec<String>> {
    let owners = fetch_barcode_rows(tx, &query::select_barcode_owners(barcodes)).await?;

    let taken: Vec<String> = owners
        .into_iter()
        .filter(|owner| owner.product_id != id)
        .map(|owner| owner.barcode)
        .collect();

    if !taken.is_empty() {
        return Ok(taken);
    }

    let mut seen = HashSet::new();
    let mut repeated = Vec::new();

    for barcode in barcodes {
        if !seen.insert(barcode.as_str()) && !repeated.contains(barcode) {
            repeated.push(barcode.clone());
        }
    }

    Ok(repeated)
}

async fn insert_attributes(
    tx: &mut Transaction<'_, Sqlite>,
    id: ProductId,
    attributes: &[ProductAttribute],
) -> DbResult<()> {
    for statement in query::insert_attributes(id, attributes) {
        execute(tx, &statement).await?;
    }

    Ok(())
}

/// Rolls back and hands the original error back to the caller.
async fn rollback(tx: Transaction<'_, Sqlite>, operation: &str, err: DbError) -> DbError {
    warn!(operation, error = %err, "Rolling back product write");

    if let Err(rollback_err) = tx.rollback().await {
        error!(operation, error = %rollback_err, "Rollback failed");
    }

    err
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use shelf_core::ChildUpdate;

    async fn setup() -> (Database, ProductWriter) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let writer = ProductWriter::new(db.pool().clone());
        (db, writer)
    }

    fn mug(sku: &str, barcodes: &[&str]) -> NewProduct {
        NewProduct {
            title: "Mug".to_string(),
            sku: sku.to_string(),
            price: "9.99".to_string(),
            description: None,
            barcodes: barcodes.iter().map(|b| b.to_string()).collect(),
            attributes: vec![ProductAttribute::new("color", "red")],
        }
    }

    async fn row_count(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_writes_all_tables() {
        let (db, writer) = setup().await;

        let id = writer.create(&mug("MUG-1", &["111", "222"])).await.unwrap();

        assert!(id > 0);
        assert_eq!(row_count(&db, "product").await, 1);
        assert_eq!(row_count(&db, "product_barcode").await, 2);
        assert_eq!(row_count(&db, "product_attribute").await, 1);
    }

    #[tokio::test]
    async fn test_create_rolls_back_on_duplicate_barcode() {
        let (db, writer) = setup().await;
        writer.create(&mug("MUG-1", &["111"])).await.unwrap();

        let err = writer
            .create(&mug("MUG-2", &["222", "111"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::UniqueViolation { ref field, ref value } if field == "barcode" && value == "111"
        ));
        assert_eq!(row_count(&db, "product").await, 1);
        assert_eq!(row_count(&db, "product_barcode").await, 1);
        assert_eq!(row_count(&db, "product_attribute").await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_barcode_names_only_the_colliding_ones() {
        let (_db, writer) = setup().await;
        let first = writer.create(&mug("MUG-1", &["111", "222"])).await.unwrap();

        let err = writer
            .create(&mug("MUG-2", &["333", "222", "444", "111"]))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate barcode: '111, 222' already exists");

        // Own barcodes don't count against an update
        let second = writer.create(&mug("MUG-3", &["555"])).await.unwrap();
        let patch = ProductPatch {
            barcodes: ChildUpdate::Replace(vec!["555".to_string(), "111".to_string()]),
            ..ProductPatch::default()
        };
        let err = writer.update(second, &patch).await.unwrap_err();
        assert_eq!(err.to_string(), "Duplicate barcode: '111' already exists");

        let patch = ProductPatch {
            barcodes: ChildUpdate::Replace(vec!["666".to_string(), "666".to_string()]),
            ..ProductPatch::default()
        };
        let err = writer.update(first, &patch).await.unwrap_err();
        assert_eq!(err.to_string(), "Duplicate barcode: '666' already exists");
    }

    #[tokio::test]
    async fn test_create_reports_duplicate_sku() {
        let (_db, writer) = setup().await;
        writer.create(&mug("MUG-1", &[])).await.unwrap();

        let err = writer.create(&mug("MUG-1", &[])).await.unwrap_err();

        assert_eq!(err.to_string(), "Duplicate sku: 'MUG-1' already exists");
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let (db, writer) = setup().await;

        let patch = ProductPatch {
            barcodes: ChildUpdate::Replace(vec!["111".to_string()]),
            ..ProductPatch::default()
        };
        let err = writer.update(42, &patch).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(row_count(&db, "product_barcode").await, 0);
    }

    #[tokio::test]
    async fn test_update_rolls_back_parent_when_children_fail() {
        let (db, writer) = setup().await;
        let first = writer.create(&mug("MUG-1", &["111"])).await.unwrap();
        writer.create(&mug("MUG-2", &["222"])).await.unwrap();

        let patch = ProductPatch {
            title: Some("Cup".to_string()),
            barcodes: ChildUpdate::Replace(vec!["222".to_string()]),
            ..ProductPatch::default()
        };
        assert!(writer.update(first, &patch).await.is_err());

        let title: String = sqlx::query_scalar("SELECT title FROM product WHERE id = ?")
            .bind(i64::from(first))
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(title, "Mug");

        let barcodes: Vec<String> =
            sqlx::query_scalar("SELECT barcode FROM product_barcode WHERE product_id = ?")
                .bind(i64::from(first))
                .fetch_all(db.pool())
                .await
                .unwrap();
        assert_eq!(barcodes, vec!["111"]);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_product_existed() {
        let (db, writer) = setup().await;
        let id = writer.create(&mug("MUG-1", &["111"])).await.unwrap();

        assert!(writer.delete(id).await.unwrap());
        assert!(!writer.delete(id).await.unwrap());

        assert_eq!(row_count(&db, "product").await, 0);
        assert_eq!(row_count(&db, "product_barcode").await, 0);
        assert_eq!(row_count(&db, "product_attribute").await, 0);
    }
}
