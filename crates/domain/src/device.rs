//! Device — a managed piece of hardware with a name, a brand, a lifecycle
//! state, and an audit timestamp.
//!
//! All fields are private; every mutation goes through a setter that
//! re-validates the value, so a [`Device`] can never hold a blank name or
//! brand.

pub mod draft;
pub mod state;

pub use draft::DeviceDraft;
pub use state::DeviceState;

use serde::Serialize;

use crate::error::DomainError;
use crate::id::DeviceId;
use crate::time::{self, Timestamp};

/// A device as persisted and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    id: DeviceId,
    name: String,
    brand: String,
    state: DeviceState,
    creation_time: Timestamp,
}

/// Trim and reject blank values.
fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::required(field));
    }
    Ok(value.to_string())
}

impl Device {
    /// Create a brand new device with a fresh identifier and the current time.
    ///
    /// A missing or blank `state` defaults to [`DeviceState::Available`].
    ///
    /// # Errors
    ///
    /// Returns a `required` error for a blank `name` or `brand`, or
    /// `invalid_state` for an unknown state.
    pub fn create(name: &str, brand: &str, state: Option<&str>) -> Result<Self, DomainError> {
        let name = required("name", name)?;
        let brand = required("brand", brand)?;
        let state = match state {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => DeviceState::default(),
        };

        Ok(Self {
            id: DeviceId::new(),
            name,
            brand,
            state,
            creation_time: time::now(),
        })
    }

    /// Rebuild a device from stored values, applying the same field checks
    /// as [`create`](Self::create).
    ///
    /// # Errors
    ///
    /// Returns a `required` error for a blank `name` or `brand`, or
    /// `invalid_state` if `state` is not a known state.
    pub fn reconstruct(
        id: DeviceId,
        name: &str,
        brand: &str,
        state: &str,
        creation_time: Timestamp,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            name: required("name", name)?,
            brand: required("brand", brand)?,
            state: state.parse()?,
            creation_time,
        })
    }

    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state
    }

    #[must_use]
    pub fn creation_time(&self) -> Timestamp {
        self.creation_time
    }

    /// Rename the device.
    ///
    /// # Errors
    ///
    /// Returns a `required` error when `name` is blank; the device is left
    /// unchanged.
    pub fn set_name(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = required("name", name)?;
        Ok(())
    }

    /// Change the brand.
    ///
    /// # Errors
    ///
    /// Returns a `required` error when `brand` is blank; the device is left
    /// unchanged.
    pub fn set_brand(&mut self, brand: &str) -> Result<(), DomainError> {
        self.brand = required("brand", brand)?;
        Ok(())
    }

    /// Change the lifecycle state from its textual form.
    ///
    /// # Errors
    ///
    /// Returns `invalid_state` when `state` is not a known state.
    pub fn set_state(&mut self, state: &str) -> Result<(), DomainError> {
        self.state = state.parse()?;
        Ok(())
    }

    pub fn set_state_value(&mut self, state: DeviceState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn iphone() -> Device {
        Device::create("iPhone 15", "Apple", None).unwrap()
    }

    #[test]
    fn should_default_to_available_when_state_omitted() {
        let before = time::now();
        let device = iphone();
        let after = time::now();

        assert_eq!(device.state(), DeviceState::Available);
        assert_eq!(device.name(), "iPhone 15");
        assert_eq!(device.brand(), "Apple");
        assert!(device.creation_time() >= before);
        assert!(device.creation_time() <= after + Duration::seconds(1));
    }

    #[test]
    fn should_default_to_available_when_state_is_blank() {
        let device = Device::create("PS5", "Sony", Some("   ")).unwrap();
        assert_eq!(device.state(), DeviceState::Available);
    }

    #[test]
    fn should_accept_provided_state_case_insensitively() {
        let device = Device::create("ThinkPad X1", "Lenovo", Some("INACTIVE")).unwrap();
        assert_eq!(device.state(), DeviceState::Inactive);
    }

    #[test]
    fn should_trim_name_and_brand() {
        let device = Device::create("  Pixel 8 ", " Google ", None).unwrap();
        assert_eq!(device.name(), "Pixel 8");
        assert_eq!(device.brand(), "Google");
    }

    #[test]
    fn should_generate_distinct_ids() {
        assert_ne!(iphone().id(), iphone().id());
    }

    #[test]
    fn should_reject_blank_name_with_required() {
        for name in ["", "   ", "\t\n"] {
            let err = Device::create(name, "Apple", None).unwrap_err();
            assert_eq!(err.code, "required");
            assert_eq!(err.field, "name");
        }
    }

    #[test]
    fn should_reject_blank_brand_with_required() {
        let err = Device::create("PS5", "   ", None).unwrap_err();
        assert_eq!(err.code, "required");
        assert_eq!(err.field, "brand");
    }

    #[test]
    fn should_report_name_before_brand_when_both_blank() {
        let err = Device::create("", "", None).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn should_reject_unknown_state_on_create() {
        let err = Device::create("Router", "TP-Link", Some("broken")).unwrap_err();
        assert_eq!(err.code, "invalid_state");
        assert_eq!(err.field, "state");
    }

    #[test]
    fn should_reconstruct_with_given_id_and_time() {
        let id = DeviceId::new();
        let ts = time::parse_storage_string("2024-05-01T10:00:00Z").unwrap();
        let device = Device::reconstruct(id, "Kindle", "Amazon", "In-Use", ts).unwrap();

        assert_eq!(device.id(), id);
        assert_eq!(device.state(), DeviceState::InUse);
        assert_eq!(device.creation_time(), ts);
    }

    #[test]
    fn should_reject_invalid_fields_on_reconstruct() {
        let id = DeviceId::new();
        let ts = time::now();
        assert_eq!(
            Device::reconstruct(id, " ", "Amazon", "available", ts)
                .unwrap_err()
                .field,
            "name"
        );
        assert_eq!(
            Device::reconstruct(id, "Kindle", "", "available", ts)
                .unwrap_err()
                .field,
            "brand"
        );
        assert_eq!(
            Device::reconstruct(id, "Kindle", "Amazon", "lost", ts)
                .unwrap_err()
                .code,
            "invalid_state"
        );
    }

    #[test]
    fn should_update_name_and_brand_when_valid() {
        let mut device = iphone();
        device.set_name("  iPhone 16 ").unwrap();
        device.set_brand("Apple Inc.").unwrap();
        assert_eq!(device.name(), "iPhone 16");
        assert_eq!(device.brand(), "Apple Inc.");
    }

    #[test]
    fn should_leave_device_unchanged_when_setter_fails() {
        let mut device = iphone();
        let err = device.set_name("  ").unwrap_err();
        assert_eq!(err.code, "required");
        assert_eq!(device.name(), "iPhone 15");

        let err = device.set_brand("").unwrap_err();
        assert_eq!(err.field, "brand");
        assert_eq!(device.brand(), "Apple");

        let err = device.set_state("retired").unwrap_err();
        assert_eq!(err.code, "invalid_state");
        assert_eq!(device.state(), DeviceState::Available);
    }

    #[test]
    fn should_normalize_state_on_set_state() {
        let mut device = iphone();
        device.set_state(" In-Use ").unwrap();
        assert_eq!(device.state(), DeviceState::InUse);
        assert_eq!(device.state().as_str(), "in-use");
    }

    #[test]
    fn should_serialize_to_api_shape() {
        let device = Device::create("iPhone 15", "Apple", Some("in-use")).unwrap();
        let json = serde_json::to_value(&device).unwrap();

        assert_eq!(json["id"], device.id().to_string());
        assert_eq!(json["name"], "iPhone 15");
        assert_eq!(json["brand"], "Apple");
        assert_eq!(json["state"], "in-use");
        let ts = json["creation_time"].as_str().unwrap();
        assert_eq!(
            time::parse_storage_string(ts).unwrap(),
            device.creation_time()
        );
    }
}
