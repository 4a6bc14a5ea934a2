//! Connection pool for the device database.
//!
//! Every pooled connection gets the [`UNICODE_NOCASE`] collation registered,
//! since `SQLite`'s own `NOCASE` and `LOWER` only fold ASCII letters.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use devicehub_app::ports::storage::same_text_ignoring_case;

use crate::error::StorageError;

/// Collation comparing text case-insensitively, including non-ASCII letters.
pub const UNICODE_NOCASE: &str = "UNICODE_NOCASE";

fn unicode_nocase(a: &str, b: &str) -> std::cmp::Ordering {
    if same_text_ignoring_case(a, b) {
        std::cmp::Ordering::Equal
    } else {
        a.to_lowercase().cmp(&b.to_lowercase())
    }
}

/// Where the device database lives.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:devices.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Open the database described by this configuration.
    ///
    /// The file is created when missing and the `devices` table is migrated
    /// into place before the pool is handed out.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] for a malformed URL, a failed connection, or
    /// a failed migration.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(true)
            .collation(UNICODE_NOCASE, unicode_nocase);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(url = %self.database_url, "device database ready");

        Ok(Database { pool })
    }
}

/// An open, migrated device database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
