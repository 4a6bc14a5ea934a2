//! Common error types used across the workspace.
//!
//! Domain failures are plain values ([`DomainError`]) carrying a machine
//! readable code, the offending field, a message, and a suggested HTTP status.
//! Every layer converts its own typed errors into [`DeviceHubError`] via
//! `From`, so the boundary only has to tell domain failures apart from
//! infrastructure ones.

use serde::Serialize;

/// HTTP status hints carried by [`DomainError`].
///
/// Kept as plain integers so the domain does not depend on an HTTP crate.
pub mod status {
    pub const BAD_REQUEST: u16 = 400;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// A business-rule or validation failure that can be mapped to a transport
/// response as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct DomainError {
    /// Machine readable code, e.g. `required`, `invalid_state`.
    pub code: String,
    /// Name of the offending attribute; empty when not field-specific.
    pub field: String,
    /// Human readable description.
    pub message: String,
    /// Suggested HTTP status.
    #[serde(skip)]
    pub status: u16,
}

impl DomainError {
    fn new(
        code: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
        status: u16,
    ) -> Self {
        Self {
            code: code.into(),
            field: field.into(),
            message: message.into(),
            status,
        }
    }

    /// A mandatory field is missing or blank.
    #[must_use]
    pub fn required(field: &str) -> Self {
        Self::new("required", field, format!("{field} is required"), status::BAD_REQUEST)
    }

    /// A field holds a value outside its accepted domain.
    #[must_use]
    pub fn invalid(field: &str, reason: impl Into<String>, status: u16) -> Self {
        Self::new(format!("invalid_{field}"), field, reason, status)
    }

    /// The operation is not allowed given the current state of `resource`.
    #[must_use]
    pub fn conflict(resource: &str, reason: impl Into<String>) -> Self {
        Self::new(
            format!("conflict_{resource}"),
            resource,
            reason,
            status::CONFLICT,
        )
    }

    /// A mutation of `field` is disallowed by a business rule.
    #[must_use]
    pub fn forbidden_change(field: &str, reason: &str, status: u16) -> Self {
        Self::new(
            "forbidden_change",
            field,
            format!("cannot change {field}: {reason}"),
            status,
        )
    }

    /// Attempt to change an attribute that never changes after creation.
    #[must_use]
    pub fn immutable(field: &str) -> Self {
        Self::new(
            "immutable_field",
            field,
            format!("{field} is immutable"),
            status::BAD_REQUEST,
        )
    }

    /// The addressed resource does not exist.
    #[must_use]
    pub fn not_found(field: &str, message: impl Into<String>) -> Self {
        Self::new("not_found", field, message, status::NOT_FOUND)
    }

    /// The request body could not be decoded.
    #[must_use]
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new("invalid_json", "", message, status::BAD_REQUEST)
    }

    /// An unexpected failure inside the domain itself.
    #[must_use]
    pub fn internal(field: &str, message: impl Into<String>) -> Self {
        Self::new(
            "internal_error",
            field,
            message,
            status::INTERNAL_SERVER_ERROR,
        )
    }
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of resource that was looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// The identifier that was not found.
    pub id: String,
}

/// Top-level error type shared by every layer of the workspace.
#[derive(Debug, thiserror::Error)]
pub enum DeviceHubError {
    /// Validation or business-rule violation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage reported that no row matched.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Opaque infrastructure failure (database, connectivity, …).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}
