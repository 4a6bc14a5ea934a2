//! Storage port — repository trait for device persistence.

use std::future::Future;

use devicehub_domain::device::Device;
use devicehub_domain::error::DeviceHubError;
use devicehub_domain::id::DeviceId;

/// Optional equality filters for [`DeviceRepository::find_all`].
///
/// Matching is case-insensitive. Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    pub brand: Option<String>,
    pub state: Option<String>,
}

/// Case-insensitive comparison covering non-ASCII letters.
pub fn same_text_ignoring_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl DeviceFilter {
    /// Build a filter from raw, possibly blank, query values.
    #[must_use]
    pub fn new(brand: Option<String>, state: Option<String>) -> Self {
        Self {
            brand: non_blank(brand),
            state: non_blank(state),
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = non_blank(Some(brand.into()));
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = non_blank(Some(state.into()));
        self
    }

    /// Whether `device` passes every filter that is set.
    ///
    /// Backends that cannot push the filter down (e.g. an in-memory map) use
    /// this for a linear scan.
    #[must_use]
    pub fn matches(&self, device: &Device) -> bool {
        let brand_ok = self
            .brand
            .as_deref()
            .is_none_or(|brand| same_text_ignoring_case(device.brand(), brand));
        let state_ok = self
            .state
            .as_deref()
            .is_none_or(|state| same_text_ignoring_case(device.state().as_str(), state));
        brand_ok && state_ok
    }
}

/// Repository for persisting and querying [`Device`]s.
///
/// Storage-level failures are reported as [`DeviceHubError::Storage`]; a
/// missing row on `update`/`delete` is [`DeviceHubError::NotFound`]. Domain
/// errors are never produced here.
pub trait DeviceRepository {
    /// Persist a new device and return it unchanged.
    ///
    /// Fails if a device with the same id already exists.
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, DeviceHubError>> + Send;

    /// Get a device by its unique identifier; `None` when it does not exist.
    fn find_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DeviceHubError>> + Send;

    /// List devices matching `filter`, most recently created first.
    fn find_all(
        &self,
        filter: &DeviceFilter,
    ) -> impl Future<Output = Result<Vec<Device>, DeviceHubError>> + Send;

    /// Overwrite name, brand, and state of an existing device.
    ///
    /// The stored id and creation time are never rewritten.
    fn update(&self, device: Device)
    -> impl Future<Output = Result<Device, DeviceHubError>> + Send;

    /// Remove a device by its unique identifier.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DeviceHubError>> + Send;
}
