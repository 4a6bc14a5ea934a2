//! # devicehub-domain
//!
//! Pure domain model for the devicehub device registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Device** aggregate (name, brand, lifecycle state, creation
//!   time) and the **`DeviceDraft`** accepted on creation
//! - Contain all field-level invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
