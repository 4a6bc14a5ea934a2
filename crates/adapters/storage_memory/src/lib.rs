//! # devicehub-adapter-storage-memory
//!
//! Volatile persistence adapter keeping devices in process memory.
//!
//! ## Responsibilities
//! - Implement the `DeviceRepository` port defined in `devicehub-app::ports::storage`
//! - Own the device map behind an async `RwLock`; the repository object is
//!   injected wherever it is needed, there is no global store
//!
//! ## Dependency rule
//! Depends on `devicehub-app` (for port traits) and `devicehub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod device_repo;
pub mod error;

pub use device_repo::InMemoryDeviceRepository;
pub use error::MemoryStorageError;
