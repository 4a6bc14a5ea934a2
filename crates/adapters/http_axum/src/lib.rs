//! # devicehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **versioned JSON API** under `/v1/devices`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses; domain errors keep their
//!   carried status, anything else becomes a generic `500`
//!
//! ## Dependency rule
//! Depends on `devicehub-app` (for port traits and services) and `devicehub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
