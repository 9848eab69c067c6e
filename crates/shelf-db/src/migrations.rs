//! # Schema Bootstrap
//!
//! Embeds the product schema script and applies it on startup.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_product_schema.sql   product, product_barcode, product_attribute
//! ```
//!
//! The script is written with `IF NOT EXISTS`, and sqlx records it in
//! `_sqlx_migrations`, so running it against an existing database is a
//! no-op. There is no versioned schema evolution.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded schema from the `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds the SQL files into the binary at
/// compile time. No runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies the schema script if it has not run yet.
///
/// ## Example
/// ```rust,ignore
/// run_migrations(&pool).await?;
/// ```
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!(
        scripts = MIGRATOR.migrations.len(),
        "Checking product schema"
    );

    MIGRATOR.run(pool).await?;

    info!("Product schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        run_migrations(db.pool()).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name LIKE 'product%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        assert_eq!(
            tables,
            vec!["product", "product_attribute", "product_barcode"]
        );
    }
}
