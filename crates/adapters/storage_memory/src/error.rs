//! Errors raised by the in-memory store.

use devicehub_domain::error::DeviceHubError;
use devicehub_domain::id::DeviceId;

/// Errors specific to the in-memory adapter.
#[derive(Debug, thiserror::Error)]
pub enum MemoryStorageError {
    /// A device with this id is already stored.
    #[error("device {0} already exists")]
    DuplicateId(DeviceId),
}

impl From<MemoryStorageError> for DeviceHubError {
    fn from(err: MemoryStorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
