//! In-memory implementation of [`DeviceRepository`].

use std::cmp::Reverse;
use std::collections::HashMap;
use std::future::Future;

use tokio::sync::RwLock;

use devicehub_app::ports::{DeviceFilter, DeviceRepository};
use devicehub_domain::device::Device;
use devicehub_domain::error::{DeviceHubError, NotFoundError};
use devicehub_domain::id::DeviceId;

use crate::error::MemoryStorageError;

fn not_found(id: DeviceId) -> DeviceHubError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

/// Map-backed device repository. Every operation takes the lock once, so
/// each call is atomic with respect to concurrent requests.
#[derive(Default)]
pub struct InMemoryDeviceRepository {
    devices: RwLock<HashMap<DeviceId, Device>>,
}

impl InMemoryDeviceRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeviceRepository for InMemoryDeviceRepository {
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, DeviceHubError>> + Send {
        async move {
            let mut devices = self.devices.write().await;
            if devices.contains_key(&device.id()) {
                return Err(MemoryStorageError::DuplicateId(device.id()).into());
            }
            devices.insert(device.id(), device.clone());
            tracing::debug!(device_id = %device.id(), "stored device in memory");
            Ok(device)
        }
    }

    fn find_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DeviceHubError>> + Send {
        async move { Ok(self.devices.read().await.get(&id).cloned()) }
    }

    fn find_all(
        &self,
        filter: &DeviceFilter,
    ) -> impl Future<Output = Result<Vec<Device>, DeviceHubError>> + Send {
        let filter = filter.clone();
        async move {
            let devices = self.devices.read().await;
            let mut matching: Vec<Device> = devices
                .values()
                .filter(|device| filter.matches(device))
                .cloned()
                .collect();
            matching.sort_by_key(|device| Reverse(device.creation_time()));
            Ok(matching)
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DeviceHubError>> + Send {
        async move {
            let mut devices = self.devices.write().await;
            let stored = devices
                .get_mut(&device.id())
                .ok_or_else(|| not_found(device.id()))?;

            // Only the mutable attributes are copied over.
            stored.set_name(device.name())?;
            stored.set_brand(device.brand())?;
            stored.set_state_value(device.state());
            Ok(stored.clone())
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DeviceHubError>> + Send {
        async move {
            self.devices
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| not_found(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devicehub_domain::device::DeviceState;
    use devicehub_domain::time;

    fn device(name: &str, brand: &str, state: &str) -> Device {
        Device::create(name, brand, Some(state)).unwrap()
    }

    fn device_at(name: &str, brand: &str, state: &str, ts: &str) -> Device {
        Device::reconstruct(
            DeviceId::new(),
            name,
            brand,
            state,
            time::parse_storage_string(ts).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn should_save_and_find_device() {
        let repo = InMemoryDeviceRepository::new();
        let device = device("iPhone 15", "Apple", "available");

        let saved = repo.save(device.clone()).await.unwrap();
        assert_eq!(saved, device);

        let fetched = repo.find_by_id(device.id()).await.unwrap().unwrap();
        assert_eq!(fetched, device);
    }

    #[tokio::test]
    async fn should_reject_duplicate_id() {
        let repo = InMemoryDeviceRepository::new();
        let device = device("iPhone 15", "Apple", "available");
        repo.save(device.clone()).await.unwrap();

        let result = repo.save(device).await;
        assert!(matches!(result, Err(DeviceHubError::Storage(_))));
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = InMemoryDeviceRepository::new();
        assert!(repo.find_by_id(DeviceId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_list_newest_first() {
        let repo = InMemoryDeviceRepository::new();
        let oldest = device_at("A", "Apple", "available", "2024-01-01T00:00:00Z");
        let newest = device_at("C", "Apple", "available", "2024-03-01T00:00:00Z");
        let middle = device_at("B", "Apple", "available", "2024-02-01T00:00:00Z");
        for d in [&oldest, &newest, &middle] {
            repo.save(d.clone()).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_all(&DeviceFilter::default())
            .await
            .unwrap()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn should_filter_by_brand_and_state_case_insensitively() {
        let repo = InMemoryDeviceRepository::new();
        repo.save(device("iPhone", "Apple", "in-use")).await.unwrap();
        repo.save(device("iPad", "apple", "available")).await.unwrap();
        repo.save(device("PS5", "Sony", "in-use")).await.unwrap();

        let apple = repo
            .find_all(&DeviceFilter::default().with_brand("APPLE"))
            .await
            .unwrap();
        assert_eq!(apple.len(), 2);

        let apple_in_use = repo
            .find_all(&DeviceFilter::default().with_brand("apple").with_state("In-Use"))
            .await
            .unwrap();
        assert_eq!(apple_in_use.len(), 1);
        assert_eq!(apple_in_use[0].name(), "iPhone");
    }

    #[tokio::test]
    async fn should_filter_non_ascii_brand_case_insensitively() {
        let repo = InMemoryDeviceRepository::new();
        repo.save(device("Stol", "Ärlig", "available")).await.unwrap();
        repo.save(device("Bord", "Arlig", "available")).await.unwrap();

        let found = repo
            .find_all(&DeviceFilter::default().with_brand("ärlig"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Stol");
    }

    #[tokio::test]
    async fn should_return_empty_list_when_nothing_matches() {
        let repo = InMemoryDeviceRepository::new();
        repo.save(device("iPhone", "Apple", "available")).await.unwrap();
        let none = repo
            .find_all(&DeviceFilter::default().with_brand("Nokia"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn should_update_mutable_fields_only() {
        let repo = InMemoryDeviceRepository::new();
        let original = device("iPhone", "Apple", "available");
        repo.save(original.clone()).await.unwrap();

        let mut changed = original.clone();
        changed.set_name("iPhone 2").unwrap();
        changed.set_state("inactive").unwrap();
        let updated = repo.update(changed).await.unwrap();

        assert_eq!(updated.name(), "iPhone 2");
        assert_eq!(updated.state(), DeviceState::Inactive);
        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.creation_time(), original.creation_time());
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_device() {
        let repo = InMemoryDeviceRepository::new();
        let result = repo.update(device("Ghost", "None", "available")).await;
        assert!(matches!(result, Err(DeviceHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_device_once() {
        let repo = InMemoryDeviceRepository::new();
        let device = device("Kindle", "Amazon", "inactive");
        repo.save(device.clone()).await.unwrap();

        repo.delete(device.id()).await.unwrap();
        assert!(repo.find_by_id(device.id()).await.unwrap().is_none());

        let again = repo.delete(device.id()).await;
        assert!(matches!(again, Err(DeviceHubError::NotFound(_))));
    }
}
