//! Storage-specific error type wrapping sqlx errors.

use devicehub_domain::error::DeviceHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The primary key is already taken.
    #[error("device {0} already exists")]
    DuplicateId(String),
}

impl StorageError {
    /// Classify an insert failure, singling out primary key collisions.
    pub(crate) fn from_insert(err: sqlx::Error, id: String) -> Self {
        let unique = err
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            Self::DuplicateId(id)
        } else {
            Self::Database(err)
        }
    }
}

impl From<StorageError> for DeviceHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
