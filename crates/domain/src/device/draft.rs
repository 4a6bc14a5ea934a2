//! Device draft — the client-supplied shape of a device that does not exist
//! yet.

use serde::Deserialize;

use super::{Device, DeviceState};
use crate::error::{DomainError, status};

/// Fields a client may send when asking for a new device.
///
/// `id` and `creation_time` are server-generated; they are accepted here only
/// so that a request carrying them can be rejected explicitly instead of
/// being silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeviceDraft {
    pub id: Option<String>,
    pub name: String,
    pub brand: String,
    pub state: Option<String>,
    pub creation_time: Option<String>,
}

impl DeviceDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Check that the draft is acceptable for creation.
    ///
    /// A blank state is replaced with `available`; a valid one is rewritten
    /// in its canonical form.
    ///
    /// # Errors
    ///
    /// - `invalid_id` when an id was supplied
    /// - `invalid_creation_time` when a creation time was supplied
    /// - `required` for a blank name or brand
    /// - `invalid_state` for an unknown state
    pub fn validate_for_create(&mut self) -> Result<(), DomainError> {
        if self.id.as_deref().is_some_and(|id| !id.trim().is_empty()) {
            return Err(DomainError::invalid(
                "id",
                "id must be empty on create (server-generated)",
                status::BAD_REQUEST,
            ));
        }
        if self
            .creation_time
            .as_deref()
            .is_some_and(|ts| !ts.trim().is_empty())
        {
            return Err(DomainError::invalid(
                "creation_time",
                "creation_time must not be set on create",
                status::BAD_REQUEST,
            ));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::required("name"));
        }
        if self.brand.trim().is_empty() {
            return Err(DomainError::required("brand"));
        }

        let state = match self.state.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => DeviceState::default(),
        };
        self.state = Some(state.as_str().to_string());
        Ok(())
    }

    /// Validate the draft and turn it into a new [`Device`].
    ///
    /// # Errors
    ///
    /// See [`validate_for_create`](Self::validate_for_create).
    pub fn into_device(mut self) -> Result<Device, DomainError> {
        self.validate_for_create()?;
        Device::create(&self.name, &self.brand, self.state.as_deref())
    }
}
