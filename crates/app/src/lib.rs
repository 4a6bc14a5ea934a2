//! # devicehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **`DeviceRepository`** port that storage adapters implement
//! - Define the **`DeviceService`** use-cases: create, get, list, update,
//!   delete, including the rules that freeze an in-use device
//! - Slice list results into pages
//!
//! ## Dependency rule
//! Depends on `devicehub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod pagination;
pub mod ports;
pub mod services;
