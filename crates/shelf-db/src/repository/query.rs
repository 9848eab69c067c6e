//! # Statement Builder
//!
//! Composes parameterized SQL for product reads and writes.
//!
//! ## Shape of a List Read
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Auxiliary style (default)             Join style                       │
//! │  ─────────────────────────────         ───────────────────────────────  │
//! │  SELECT <cols> FROM product            SELECT page.<cols>,              │
//! │    [LEFT JOIN product_barcode]                product_barcode.barcode,  │
//! │    [WHERE sku = ? AND barcode = ?]            product_attribute.*       │
//! │    ORDER BY product.id                 FROM (<page select>) AS page     │
//! │    LIMIT ? OFFSET ?                      LEFT JOIN product_barcode      │
//! │                                          LEFT JOIN product_attribute    │
//! │  + SELECT ... FROM product_barcode       ORDER BY page.id               │
//! │      WHERE product_id IN (?, ?, ...)                                    │
//! │  + SELECT ... FROM product_attribute   Pagination happens inside the    │
//! │      WHERE product_id IN (?, ?, ...)   sub-select, so LIMIT counts      │
//! │                                        products, not joined rows.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Caller values never reach the SQL text. Every value is a bound `?`
//! parameter, and [`Statement::arguments`] refuses to bind when the
//! placeholder count and the value count disagree.
//!
//! Builders over a list of values return one statement per chunk so no
//! statement binds more than [`MAX_BIND_PARAMS`] values. An empty list
//! yields no statement at all instead of `IN ()`.

use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Arguments, Sqlite};

use shelf_core::{
    Column, FieldSelection, NewProduct, ProductAttribute, ProductId, ProductPatch, ProductQuery,
};

use crate::error::{DbError, DbResult};

// =============================================================================
// Tables
// =============================================================================

pub const PRODUCT_TABLE: &str = "product";
pub const BARCODE_TABLE: &str = "product_barcode";
pub const ATTRIBUTE_TABLE: &str = "product_attribute";

/// SQLite's default `SQLITE_MAX_VARIABLE_NUMBER`.
pub const MAX_BIND_PARAMS: usize = 32766;

/// Result-column aliases of the child payload in a joined read.
pub const BARCODE_ALIAS: &str = "barcode";
pub const ATTRIBUTE_NAME_ALIAS: &str = "attribute_name";
pub const ATTRIBUTE_VALUE_ALIAS: &str = "attribute_value";

// =============================================================================
// Statement
// =============================================================================

/// A value bound to one `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl From<ProductId> for SqlValue {
    fn from(id: ProductId) -> Self {
        SqlValue::Integer(i64::from(id))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Statement {
            sql: sql.into(),
            params,
        }
    }

    /// Number of `?` placeholders in the SQL text.
    ///
    /// Builders never emit a literal `?` inside quoted SQL, so a plain count
    /// is exact.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Binds the parameters, checking that every placeholder gets exactly
    /// one value.
    pub fn arguments(&self) -> DbResult<SqliteArguments<'_>> {
        let expected = self.placeholder_count();

        if expected != self.params.len() {
            return Err(DbError::PlaceholderMismatch {
                expected,
                actual: self.params.len(),
            });
        }

        let mut args = SqliteArguments::default();

        for param in &self.params {
            let bound = match param {
                SqlValue::Integer(value) => args.add(*value),
                SqlValue::Text(value) => args.add(value.clone()),
                SqlValue::Timestamp(value) => args.add(*value),
            };

            bound.map_err(|e| DbError::Internal(e.to_string()))?;
        }

        Ok(args)
    }

    /// Prepares the statement for execution.
    pub fn query(&self) -> DbResult<Query<'_, Sqlite, SqliteArguments<'_>>> {
        Ok(sqlx::query_with(&self.sql, self.arguments()?))
    }
}

/// `?, ?, ?` for `count` values.
fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Rows per statement when each row binds `per_row` values.
fn rows_per_statement(per_row: usize) -> usize {
    MAX_BIND_PARAMS / per_row
}

/// One `... IN (?, ...)` statement per chunk of `values`.
fn in_list<T>(
    values: &[T],
    sql: impl Fn(&str) -> String,
    bind: impl Fn(&T) -> SqlValue,
) -> Vec<Statement> {
    values
        .chunks(rows_per_statement(1))
        .map(|chunk| {
            Statement::new(
                sql(&placeholders(chunk.len())),
                chunk.iter().map(&bind).collect(),
            )
        })
        .collect()
}

// =============================================================================
// Read Predicates
// =============================================================================

/// Exact-match predicates shared by a page query and its count query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub id: Option<ProductId>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
}

impl ProductFilter {
    /// Matches a single product.
    pub fn by_id(id: ProductId) -> Self {
        ProductFilter {
            id: Some(id),
            ..ProductFilter::default()
        }
    }

    /// Takes the SKU and barcode filters of a list query.
    pub fn from_query(query: &ProductQuery) -> Self {
        ProductFilter {
            id: None,
            sku: query.sku.clone(),
            barcode: query.barcode.clone(),
        }
    }

    /// Whether `product_barcode` has to be joined to evaluate the filter.
    pub fn joins_barcodes(&self) -> bool {
        self.barcode.is_some()
    }

    /// `FROM product [LEFT JOIN ...] [WHERE ...]` with its parameters.
    fn from_clause(&self) -> (String, Vec<SqlValue>) {
        let mut sql = format!("FROM {PRODUCT_TABLE}");
        let mut predicates = Vec::new();
        let mut params = Vec::new();

        if self.joins_barcodes() {
            sql.push_str(&format!(
                " LEFT JOIN {BARCODE_TABLE} ON {BARCODE_TABLE}.product_id = {PRODUCT_TABLE}.id"
            ));
        }

        if let Some(id) = self.id {
            predicates.push(format!("{PRODUCT_TABLE}.id = ?"));
            params.push(SqlValue::from(id));
        }

        if let Some(sku) = &self.sku {
            predicates.push(format!("{PRODUCT_TABLE}.sku = ?"));
            params.push(SqlValue::from(sku.as_str()));
        }

        if let Some(barcode) = &self.barcode {
            predicates.push(format!("{BARCODE_TABLE}.barcode = ?"));
            params.push(SqlValue::from(barcode.as_str()));
        }

        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }

        (sql, params)
    }
}

/// Offset/limit window over the ordered product ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

impl Window {
    pub fn new(offset: u64, limit: u64) -> Self {
        Window { offset, limit }
    }
}

fn to_sql_integer(value: u64) -> SqlValue {
    SqlValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}

// =============================================================================
// Read Statements
// =============================================================================

/// `table.column AS column, ...` in scan order.
fn projection(selection: &FieldSelection, table: &str) -> String {
    selection
        .columns()
        .iter()
        .map(|column| format!("{table}.{0} AS {0}", column.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Selects the requested parent columns of the matching products, ordered by
/// id and optionally windowed.
pub fn select_products(
    selection: &FieldSelection,
    filter: &ProductFilter,
    window: Option<Window>,
) -> Statement {
    let (from, mut params) = filter.from_clause();
    let distinct = if filter.joins_barcodes() { "DISTINCT " } else { "" };

    let mut sql = format!(
        "SELECT {distinct}{} {from} ORDER BY {PRODUCT_TABLE}.id",
        projection(selection, PRODUCT_TABLE)
    );

    if let Some(window) = window {
        sql.push_str(" LIMIT ? OFFSET ?");
        params.push(to_sql_integer(window.limit));
        params.push(to_sql_integer(window.offset));
    }

    Statement::new(sql, params)
}

/// Counts the products matching `filter`, ignoring any window.
pub fn count_products(filter: &ProductFilter) -> Statement {
    let (from, params) = filter.from_clause();

    Statement::new(
        format!("SELECT COUNT(DISTINCT {PRODUCT_TABLE}.id) AS total {from}"),
        params,
    )
}

/// Selects the window of matching products joined to the requested child
/// tables in a single round trip.
///
/// The windowed parent select becomes the `page` sub-select, so a product
/// with N barcodes and M attributes yields N×M rows but still counts once
/// toward the limit. Rows come back ordered by product id.
pub fn select_joined(
    selection: &FieldSelection,
    filter: &ProductFilter,
    window: Option<Window>,
) -> Statement {
    let page = select_products(selection, filter, window);

    let mut columns = selection
        .columns()
        .iter()
        .map(|column| format!("page.{0} AS {0}", column.name()))
        .collect::<Vec<_>>();

    let mut joins = String::new();

    if selection.wants_barcodes() {
        columns.push(format!("{BARCODE_TABLE}.barcode AS {BARCODE_ALIAS}"));
        joins.push_str(&format!(
            " LEFT JOIN {BARCODE_TABLE} ON {BARCODE_TABLE}.product_id = page.id"
        ));
    }

    if selection.wants_attributes() {
        columns.push(format!("{ATTRIBUTE_TABLE}.name AS {ATTRIBUTE_NAME_ALIAS}"));
        columns.push(format!("{ATTRIBUTE_TABLE}.value AS {ATTRIBUTE_VALUE_ALIAS}"));
        joins.push_str(&format!(
            " LEFT JOIN {ATTRIBUTE_TABLE} ON {ATTRIBUTE_TABLE}.product_id = page.id"
        ));
    }

    let sql = format!(
        "SELECT {} FROM ({}) AS page{joins} ORDER BY page.id",
        columns.join(", "),
        page.sql
    );

    Statement::new(sql, page.params)
}

/// Barcodes of a batch of products, ordered by owner then insertion.
pub fn select_barcodes_for(ids: &[ProductId]) -> Vec<Statement> {
    in_list(
        ids,
        |marks| {
            format!(
                "SELECT product_id, barcode FROM {BARCODE_TABLE} WHERE product_id IN ({marks}) ORDER BY product_id, rowid"
            )
        },
        |&id| SqlValue::from(id),
    )
}

/// Attributes of a batch of products, ordered by owner then insertion.
pub fn select_attributes_for(ids: &[ProductId]) -> Vec<Statement> {
    in_list(
        ids,
        |marks| {
            format!(
                "SELECT product_id, name, value FROM {ATTRIBUTE_TABLE} WHERE product_id IN ({marks}) ORDER BY product_id, rowid"
            )
        },
        |&id| SqlValue::from(id),
    )
}

/// Owners of any of the given barcodes.
pub fn select_barcode_owners(barcodes: &[String]) -> Vec<Statement> {
    in_list(
        barcodes,
        |marks| {
            format!(
                "SELECT product_id, barcode FROM {BARCODE_TABLE} WHERE barcode IN ({marks}) ORDER BY product_id, barcode"
            )
        },
        |barcode| SqlValue::from(barcode.as_str()),
    )
}

pub fn select_sku_owner(sku: &str) -> Statement {
    Statement::new(
        format!("SELECT id, sku FROM {PRODUCT_TABLE} WHERE sku = ? LIMIT 1"),
        vec![SqlValue::from(sku)],
    )
}

pub fn select_exists(id: ProductId) -> Statement {
    Statement::new(
        format!("SELECT EXISTS (SELECT 1 FROM {PRODUCT_TABLE} WHERE id = ?) AS found"),
        vec![SqlValue::from(id)],
    )
}

// =============================================================================
// Write Statements
// =============================================================================

/// Inserts the parent row with exactly the columns the input carries.
pub fn insert_product(product: &NewProduct, created: DateTime<Utc>) -> Statement {
    let mut columns = vec![Column::Title, Column::Sku, Column::Price];
    let mut params = vec![
        SqlValue::from(product.title.as_str()),
        SqlValue::from(product.sku.as_str()),
        SqlValue::from(product.price.as_str()),
    ];

    if let Some(description) = &product.description {
        columns.push(Column::Description);
        params.push(SqlValue::from(description.as_str()));
    }

    columns.push(Column::Created);
    params.push(SqlValue::Timestamp(created));

    let names = columns
        .iter()
        .map(|column| column.name())
        .collect::<Vec<_>>()
        .join(", ");

    Statement::new(
        format!(
            "INSERT INTO {PRODUCT_TABLE} ({names}) VALUES ({})",
            placeholders(columns.len())
        ),
        params,
    )
}

/// Updates the scalar columns present in `patch` and stamps `last_updated`.
pub fn update_product(id: ProductId, patch: &ProductPatch, now: DateTime<Utc>) -> Statement {
    let present = [
        (Column::Title, &patch.title),
        (Column::Sku, &patch.sku),
        (Column::Price, &patch.price),
        (Column::Description, &patch.description),
    ];

    let mut assignments = Vec::new();
    let mut params = Vec::new();

    for (column, value) in present {
        if let Some(value) = value {
            assignments.push(format!("{} = ?", column.name()));
            params.push(SqlValue::from(value.as_str()));
        }
    }

    assignments.push(format!("{} = ?", Column::LastUpdated.name()));
    params.push(SqlValue::Timestamp(now));
    params.push(SqlValue::from(id));

    Statement::new(
        format!(
            "UPDATE {PRODUCT_TABLE} SET {} WHERE id = ?",
            assignments.join(", ")
        ),
        params,
    )
}

/// Multi-row inserts of barcodes for one product.
pub fn insert_barcodes(id: ProductId, barcodes: &[String]) -> Vec<Statement> {
    barcodes
        .chunks(rows_per_statement(2))
        .map(|chunk| {
            let rows = vec!["(?, ?)"; chunk.len()].join(", ");
            let params = chunk
                .iter()
                .flat_map(|barcode| [SqlValue::from(id), SqlValue::from(barcode.as_str())])
                .collect();

            Statement::new(
                format!("INSERT INTO {BARCODE_TABLE} (product_id, barcode) VALUES {rows}"),
                params,
            )
        })
        .collect()
}

/// Multi-row inserts of attributes for one product.
pub fn insert_attributes(id: ProductId, attributes: &[ProductAttribute]) -> Vec<Statement> {
    attributes
        .chunks(rows_per_statement(3))
        .map(|chunk| {
            let rows = vec!["(?, ?, ?)"; chunk.len()].join(", ");
            let params = chunk
                .iter()
                .flat_map(|attribute| {
                    [
                        SqlValue::from(id),
                        SqlValue::from(attribute.name.as_str()),
                        SqlValue::from(attribute.value.as_str()),
                    ]
                })
                .collect();

            Statement::new(
                format!("INSERT INTO {ATTRIBUTE_TABLE} (product_id, name, value) VALUES {rows}"),
                params,
            )
        })
        .collect()
}

/// Deletes the rows of `table` owned by a product. `table` is one of the
/// child table constants.
pub fn delete_children(table: &str, id: ProductId) -> Statement {
    Statement::new(
        format!("DELETE FROM {table} WHERE product_id = ?"),
        vec![SqlValue::from(id)],
    )
}

pub fn delete_product(id: ProductId) -> Statement {
    Statement::new(
        format!("DELETE FROM {PRODUCT_TABLE} WHERE id = ?"),
        vec![SqlValue::from(id)],
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{ChildUpdate, ProductField};

    fn assert_balanced(statement: &Statement) {
        assert_eq!(
            statement.placeholder_count(),
            statement.params.len(),
            "{}",
            statement.sql
        );
    }

    #[test]
    fn test_select_products_projects_requested_columns() {
        let selection = FieldSelection::resolve(&[ProductField::Sku, ProductField::Barcodes]);
        let statement = select_products(&selection, &ProductFilter::by_id(7), None);

        assert_eq!(
            statement.sql,
            "SELECT product.id AS id, product.sku AS sku FROM product WHERE product.id = ? ORDER BY product.id"
        );
        assert_eq!(statement.params, vec![SqlValue::Integer(7)]);
    }

    #[test]
    fn test_barcode_filter_joins_and_dedups() {
        let query = ProductQuery::page(4, 2).sku("MUG-1").barcode("111");
        let selection = FieldSelection::resolve(&[ProductField::Title]);
        let statement = select_products(
            &selection,
            &ProductFilter::from_query(&query),
            Some(Window::new(query.offset, query.limit)),
        );

        assert!(statement.sql.starts_with("SELECT DISTINCT "));
        assert!(statement
            .sql
            .contains("LEFT JOIN product_barcode ON product_barcode.product_id = product.id"));
        assert!(statement
            .sql
            .contains("WHERE product.sku = ? AND product_barcode.barcode = ?"));
        assert!(statement.sql.ends_with("ORDER BY product.id LIMIT ? OFFSET ?"));
        assert_eq!(
            statement.params,
            vec![
                SqlValue::from("MUG-1"),
                SqlValue::from("111"),
                SqlValue::Integer(2),
                SqlValue::Integer(4),
            ]
        );
    }

    #[test]
    fn test_no_join_without_barcode_filter() {
        let query = ProductQuery::page(0, 10).sku("MUG-1");
        let statement = count_products(&ProductFilter::from_query(&query));

        assert_eq!(
            statement.sql,
            "SELECT COUNT(DISTINCT product.id) AS total FROM product WHERE product.sku = ?"
        );
        assert_balanced(&statement);
    }

    #[test]
    fn test_count_mirrors_predicates_without_window() {
        let query = ProductQuery::page(10, 5).barcode("111");
        let statement = count_products(&ProductFilter::from_query(&query));

        assert!(statement.sql.contains("LEFT JOIN product_barcode"));
        assert!(!statement.sql.contains("LIMIT"));
        assert_eq!(statement.params, vec![SqlValue::from("111")]);
    }

    #[test]
    fn test_joined_select_paginates_inside_subselect() {
        let statement = select_joined(
            &FieldSelection::all(),
            &ProductFilter::default(),
            Some(Window::new(0, 2)),
        );

        assert!(statement.sql.contains("FROM (SELECT product.id AS id"));
        assert!(statement.sql.contains("LIMIT ? OFFSET ?) AS page"));
        assert!(statement.sql.contains("LEFT JOIN product_barcode ON product_barcode.product_id = page.id"));
        assert!(statement.sql.contains("LEFT JOIN product_attribute ON product_attribute.product_id = page.id"));
        assert!(statement.sql.ends_with("ORDER BY page.id"));
        assert_balanced(&statement);
    }

    #[test]
    fn test_joined_select_skips_unrequested_children() {
        let selection = FieldSelection::resolve(&[ProductField::Attributes]);
        let statement = select_joined(&selection, &ProductFilter::by_id(1), None);

        assert!(!statement.sql.contains("product_barcode"));
        assert!(statement.sql.contains("product_attribute.name AS attribute_name"));
    }

    #[test]
    fn test_in_lists_bind_one_parameter_per_value() {
        let statements =
            select_barcode_owners(&["1".to_string(), "2".to_string(), "3".to_string()]);

        assert_eq!(statements.len(), 1);
        assert!(statements[0].sql.contains("barcode IN (?, ?, ?)"));
        assert_eq!(statements[0].params.len(), 3);

        let statements = select_attributes_for(&[1, 2]);
        assert!(statements[0].sql.contains("product_id IN (?, ?)"));
        assert_balanced(&statements[0]);
    }

    #[test]
    fn test_empty_lists_build_nothing() {
        assert!(select_barcode_owners(&[]).is_empty());
        assert!(select_barcodes_for(&[]).is_empty());
        assert!(select_attributes_for(&[]).is_empty());
        assert!(insert_barcodes(1, &[]).is_empty());
        assert!(insert_attributes(1, &[]).is_empty());
    }

    #[test]
    fn test_long_lists_are_split_under_the_variable_limit() {
        let barcodes: Vec<String> = (0..20_000).map(|n| n.to_string()).collect();

        let inserts = insert_barcodes(1, &barcodes);
        assert_eq!(inserts.len(), 2);
        assert_eq!(inserts[0].params.len(), MAX_BIND_PARAMS);
        assert_eq!(inserts[1].params.len(), 2 * (20_000 - MAX_BIND_PARAMS / 2));

        let lookups: Vec<String> = (0..40_000).map(|n| n.to_string()).collect();
        let selects = select_barcode_owners(&lookups);
        assert_eq!(selects.len(), 2);
        assert_eq!(
            selects.iter().map(|s| s.params.len()).sum::<usize>(),
            40_000
        );

        let attributes: Vec<ProductAttribute> = (0..11_000)
            .map(|n| ProductAttribute::new("size", n.to_string()))
            .collect();
        let inserts = insert_attributes(1, &attributes);
        assert_eq!(inserts.len(), 2);

        for statement in insert_barcodes(1, &barcodes)
            .iter()
            .chain(&selects)
            .chain(&inserts)
        {
            assert!(statement.params.len() <= MAX_BIND_PARAMS);
            assert_balanced(statement);
        }
    }

    #[test]
    fn test_insert_product_lists_only_supplied_columns() {
        let created = Utc::now();
        let product = NewProduct {
            title: "Mug".to_string(),
            sku: "MUG-1".to_string(),
            price: "9.99".to_string(),
            ..NewProduct::default()
        };

        let statement = insert_product(&product, created);
        assert_eq!(
            statement.sql,
            "INSERT INTO product (title, sku, price, created) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(statement.params[3], SqlValue::Timestamp(created));

        let product = NewProduct {
            description: Some("Blue".to_string()),
            ..product
        };
        let statement = insert_product(&product, created);
        assert!(statement.sql.contains("(title, sku, price, description, created)"));
        assert_balanced(&statement);
    }

    #[test]
    fn test_update_always_stamps_last_updated() {
        let now = Utc::now();
        let statement = update_product(3, &ProductPatch::default(), now);

        assert_eq!(statement.sql, "UPDATE product SET last_updated = ? WHERE id = ?");
        assert_eq!(
            statement.params,
            vec![SqlValue::Timestamp(now), SqlValue::Integer(3)]
        );

        let patch = ProductPatch {
            sku: Some("MUG-2".to_string()),
            description: Some(String::new()),
            barcodes: ChildUpdate::Replace(vec![]),
            ..ProductPatch::default()
        };
        let statement = update_product(3, &patch, now);
        assert_eq!(
            statement.sql,
            "UPDATE product SET sku = ?, description = ?, last_updated = ? WHERE id = ?"
        );
        assert_balanced(&statement);
    }

    #[test]
    fn test_batch_inserts() {
        let statement = insert_barcodes(5, &["111".to_string(), "222".to_string()]).remove(0);
        assert_eq!(
            statement.sql,
            "INSERT INTO product_barcode (product_id, barcode) VALUES (?, ?), (?, ?)"
        );
        assert_eq!(
            statement.params,
            vec![
                SqlValue::Integer(5),
                SqlValue::from("111"),
                SqlValue::Integer(5),
                SqlValue::from("222"),
            ]
        );

        let statement = insert_attributes(5, &[ProductAttribute::new("color", "red")]).remove(0);
        assert_eq!(statement.params.len(), 3);
        assert_balanced(&statement);
    }

    #[test]
    fn test_arguments_reject_mismatched_counts() {
        let statement = Statement::new("SELECT * FROM product WHERE id IN (?, ?)", vec![SqlValue::Integer(1)]);

        assert!(matches!(
            statement.arguments(),
            Err(DbError::PlaceholderMismatch {
                expected: 2,
                actual: 1
            })
        ));

        let statement = delete_children(BARCODE_TABLE, 1);
        assert!(statement.arguments().is_ok());
    }
}
