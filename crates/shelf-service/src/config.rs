//! Service configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                  | Default          |
//! |---------------------------|------------------|
//! | `SHELF_DATABASE_PATH`     | `./shelf.db`     |
//! | `SHELF_MAX_CONNECTIONS`   | `5`              |
//! | `SHELF_DEFAULT_PAGE_SIZE` | `10`             |
//! | `SHELF_FETCH_STRATEGY`    | `auxiliary`      |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use shelf_core::DEFAULT_PAGE_SIZE;
use shelf_db::{Database, DbConfig, DbResult, FetchStrategy};

/// Shelf configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    /// SQLite database file, or `:memory:`
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// Page size used when a list request asks for zero products
    pub default_page_size: u32,

    /// How list reads fetch barcodes and attributes
    pub fetch_strategy: FetchStrategy,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        ShelfConfig {
            database_path: PathBuf::from("./shelf.db"),
            max_connections: 5,
            default_page_size: DEFAULT_PAGE_SIZE,
            fetch_strategy: FetchStrategy::default(),
        }
    }
}

impl ShelfConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ShelfConfig::default();

        let config = ShelfConfig {
            database_path: lookup("SHELF_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            max_connections: parse(&lookup, "SHELF_MAX_CONNECTIONS")?
                .unwrap_or(defaults.max_connections),

            default_page_size: parse(&lookup, "SHELF_DEFAULT_PAGE_SIZE")?
                .unwrap_or(defaults.default_page_size),

            fetch_strategy: match lookup("SHELF_FETCH_STRATEGY") {
                Some(name) => FetchStrategy::from_name(&name)
                    .ok_or_else(|| ConfigError::InvalidValue("SHELF_FETCH_STRATEGY".to_string()))?,
                None => defaults.fetch_strategy,
            },
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("SHELF_MAX_CONNECTIONS".to_string()));
        }

        if config.default_page_size == 0 {
            return Err(ConfigError::InvalidValue("SHELF_DEFAULT_PAGE_SIZE".to_string()));
        }

        Ok(config)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let base = if self.database_path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path).max_connections(self.max_connections)
        };

        base.fetch_strategy(self.fetch_strategy)
    }

    /// Opens the database and bootstraps the schema.
    pub async fn open_database(&self) -> DbResult<Database> {
        Database::new(self.db_config()).await
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

/// Configuration error types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
