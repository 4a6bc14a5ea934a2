//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use devicehub_domain::error::{DeviceHubError, DomainError};

/// Maps [`DeviceHubError`] to an HTTP response.
///
/// Domain errors are rendered as `{code, field, message}` with their carried
/// status. Everything else is logged and flattened to a generic `500` so no
/// internal detail leaks to the client.
#[derive(Debug)]
pub struct ApiError(DeviceHubError);

impl From<DeviceHubError> for ApiError {
    fn from(err: DeviceHubError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        DomainError::invalid_json("invalid JSON body").into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.0 {
            DeviceHubError::Domain(err) => err,
            DeviceHubError::NotFound(err) => DomainError::not_found("id", err.to_string()),
            DeviceHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                DomainError::internal("", "unexpected error")
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
