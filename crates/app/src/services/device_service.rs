//! Device service — use-cases for managing devices.
//!
//! Besides delegating to the repository, this is where the rules that freeze
//! an in-use device live: it cannot be renamed, rebranded, or deleted.

use serde::Deserialize;

use devicehub_domain::device::{Device, DeviceDraft};
use devicehub_domain::error::{DeviceHubError, DomainError, status};
use devicehub_domain::id::DeviceId;

use crate::ports::{DeviceFilter, DeviceRepository};

const IN_USE_REASON: &str = "device is in use";

fn device_not_found() -> DomainError {
    DomainError::not_found("id", "device not found")
}

/// Storage reports a vanished row as `NotFound`; callers only ever see the
/// domain `not_found` error.
fn map_not_found(err: DeviceHubError) -> DeviceHubError {
    match err {
        DeviceHubError::NotFound(_) => device_not_found().into(),
        other => other,
    }
}

/// Partial update of a device. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

impl DevicePatch {
    /// First attribute in this patch that is frozen while the device is in use.
    fn frozen_field(&self) -> Option<&'static str> {
        if self.name.is_some() {
            Some("name")
        } else if self.brand.is_some() {
            Some("brand")
        } else {
            None
        }
    }

    /// Apply each present field through the entity setters, in order name,
    /// brand, state. Stops at the first invalid value. A blank state means
    /// "leave unchanged", the same as on create.
    fn apply(&self, device: &mut Device) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            device.set_name(name)?;
        }
        if let Some(brand) = &self.brand {
            device.set_brand(brand)?;
        }
        if let Some(state) = self.state.as_deref().filter(|s| !s.trim().is_empty()) {
            device.set_state(state)?;
        }
        Ok(())
    }
}

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate a client draft and persist the resulting device.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Domain`] if the draft is invalid, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, draft), fields(device_name = %draft.name))]
    pub async fn create_device(&self, draft: DeviceDraft) -> Result<Device, DeviceHubError> {
        let device = draft.into_device()?;
        tracing::debug!(device_id = %device.id(), "creating device");
        self.repo.save(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns a `not_found` domain error when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, DeviceHubError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| device_not_found().into())
    }

    /// List devices matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>, DeviceHubError> {
        self.repo.find_all(filter).await
    }

    /// Apply a partial update to an existing device.
    ///
    /// # Errors
    ///
    /// - `not_found` when the device does not exist
    /// - `forbidden_change` when the device is in use and the patch touches
    ///   its name or brand
    /// - `required` / `invalid_state` for invalid field values
    /// - a storage error from the repository
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        patch: DevicePatch,
    ) -> Result<Device, DeviceHubError> {
        let mut device = self.get_device(id).await?;

        if device.state().is_in_use()
            && let Some(field) = patch.frozen_field()
        {
            return Err(
                DomainError::forbidden_change(field, IN_USE_REASON, status::BAD_REQUEST).into(),
            );
        }

        patch.apply(&mut device)?;
        self.repo.update(device).await.map_err(map_not_found)
    }

    /// Delete a device unless it is in use.
    ///
    /// # Errors
    ///
    /// - `not_found` when the device does not exist
    /// - `conflict_device` when the device is in use
    /// - a storage error from the repository
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DeviceHubError> {
        let device = self.get_device(id).await?;
        if device.state().is_in_use() {
            return Err(DomainError::conflict("device", "cannot delete device in use").into());
        }
        self.repo.delete(id).await.map_err(map_not_found)
    }
}
