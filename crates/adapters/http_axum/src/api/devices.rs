//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use devicehub_app::pagination::{Page, PageRequest};
use devicehub_app::ports::{DeviceFilter, DeviceRepository};
use devicehub_app::services::device_service::DevicePatch;
use devicehub_domain::device::{Device, DeviceDraft};
use devicehub_domain::error::DomainError;
use devicehub_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Query string accepted by the list endpoint.
///
/// Everything is kept as raw text; blank values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub brand: Option<String>,
    pub state: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    fn page_request(&self) -> Option<PageRequest> {
        let page = non_blank(self.page.as_deref());
        let limit = non_blank(self.limit.as_deref());
        if page.is_none() && limit.is_none() {
            return None;
        }
        Some(PageRequest::from_params(page, limit))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
    Paged(Json<Page<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Paged(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// A path id that is not a UUID cannot address any device.
fn parse_id(raw: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(raw)
        .map_err(|_| ApiError::from(DomainError::not_found("id", "device not found")))
}

/// `GET /v1/devices`
pub async fn list<DR>(
    State(state): State<AppState<DR>>,
    Query(params): Query<ListParams>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let filter = DeviceFilter::new(params.brand.clone(), params.state.clone());
    let devices = state.device_service.list_devices(&filter).await?;

    Ok(match params.page_request() {
        Some(request) => ListResponse::Paged(Json(request.paginate(devices))),
        None => ListResponse::Ok(Json(devices)),
    })
}

/// `GET /v1/devices/{id}`
pub async fn get<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /v1/devices`
pub async fn create<DR>(
    State(state): State<AppState<DR>>,
    payload: Result<Json<DeviceDraft>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let Json(draft) = payload?;
    let created = state.device_service.create_device(draft).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /v1/devices/{id}`
pub async fn update<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
    payload: Result<Json<DevicePatch>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    let Json(patch) = payload?;
    let updated = state.device_service.update_device(device_id, patch).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /v1/devices/{id}`
pub async fn delete<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_id(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::NoContent)
}
