//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use devicehub_app::ports::{DeviceFilter, DeviceRepository};
use devicehub_domain::device::Device;
use devicehub_domain::error::{DeviceHubError, NotFoundError};
use devicehub_domain::id::DeviceId;
use devicehub_domain::time;

use crate::error::StorageError;
use crate::pool::UNICODE_NOCASE;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let brand: String = row.try_get("brand")?;
        let state: String = row.try_get("state")?;
        let creation_time: String = row.try_get("creation_time")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let creation_time = time::parse_storage_string(&creation_time)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Device::reconstruct(id, &name, &brand, &state, creation_time)
            .map(Self)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))
    }
}

const INSERT: &str =
    "INSERT INTO devices (id, name, brand, state, creation_time) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str =
    "SELECT id, name, brand, state, creation_time FROM devices WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, brand, state, creation_time FROM devices";
const ORDER_NEWEST_FIRST: &str = " ORDER BY creation_time DESC";
const UPDATE: &str = "UPDATE devices SET name = ?, brand = ?, state = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

fn not_found(id: DeviceId) -> DeviceHubError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

/// Append `WHERE` clauses for every filter that is set.
fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: DeviceFilter) {
    let clauses = [("brand", filter.brand), ("state", filter.state)];
    let mut keyword = " WHERE ";
    for (column, value) in clauses {
        let Some(value) = value else { continue };
        query
            .push(keyword)
            .push(column)
            .push(" = ")
            .push_bind(value)
            .push(" COLLATE ")
            .push(UNICODE_NOCASE);
        keyword = " AND ";
    }
}

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, DeviceHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = device.id().to_string();
            sqlx::query(INSERT)
                .bind(id.clone())
                .bind(device.name())
                .bind(device.brand())
                .bind(device.state().as_str())
                .bind(time::to_storage_string(&device.creation_time()))
                .execute(&pool)
                .await
                .map_err(|err| StorageError::from_insert(err, id))?;

            Ok(device)
        }
    }

    fn find_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DeviceHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_all(
        &self,
        filter: &DeviceFilter,
    ) -> impl Future<Output = Result<Vec<Device>, DeviceHubError>> + Send {
        let pool = self.pool.clone();
        let filter = filter.clone();
        async move {
            let mut query = QueryBuilder::<Sqlite>::new(SELECT_ALL);
            push_filter(&mut query, filter);
            query.push(ORDER_NEWEST_FIRST);

            let rows: Vec<Wrapper> = query
                .build_query_as()
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DeviceHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(device.name())
                .bind(device.brand())
                .bind(device.state().as_str())
                .bind(device.id().to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(device.id()));
            }
            Ok(device)
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DeviceHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use devicehub_domain::device::DeviceState;

    async fn setup() -> SqliteDeviceRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteDeviceRepository::new(db.pool().clone())
    }

    fn test_device() -> Device {
        Device::create("iPhone 15", "Apple", None).unwrap()
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
    async fn should_roundtrip_every_field_when_saved() {
        let repo = setup().await;
        let device = Device::create("MacBook", "Apple", Some("in-use")).unwrap();

        let saved = repo.save(device.clone()).await.unwrap();
        assert_eq!(saved, device);

        let fetched = repo.find_by_id(device.id()).await.unwrap().unwrap();
        assert_eq!(fetched, device);
        assert_eq!(fetched.creation_time(), device.creation_time());
    }

    #[tokio::test]
    async fn should_reject_duplicate_id() {
        let repo = setup().await;
        let device = test_device();
        repo.save(device.clone()).await.unwrap();

        let result = repo.save(device).await;
        assert!(matches!(result, Err(DeviceHubError::Storage(_))));
    }

    #[tokio::test]
    async fn should_return_none_when_device_not_found() {
        let repo = setup().await;
        let result = repo.find_by_id(DeviceId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_newest_first() {
        let repo = setup().await;
        repo.save(device_at("A", "Apple", "available", "2024-01-01T00:00:00Z"))
            .await
            .unwrap();
        repo.save(device_at("C", "Apple", "available", "2024-03-01T00:00:00Z"))
            .await
            .unwrap();
        repo.save(device_at("B", "Apple", "available", "2024-02-01T00:00:00.5Z"))
            .await
            .unwrap();

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
        let repo = setup().await;
        repo.save(Device::create("iPhone", "Apple", Some("in-use")).unwrap())
            .await
            .unwrap();
        repo.save(Device::create("iPad", "APPLE", None).unwrap())
            .await
            .unwrap();
        repo.save(Device::create("PS5", "Sony", Some("in-use")).unwrap())
            .await
            .unwrap();

        let apple = repo
            .find_all(&DeviceFilter::default().with_brand("apple"))
            .await
            .unwrap();
        assert_eq!(apple.len(), 2);

        let in_use = repo
            .find_all(&DeviceFilter::default().with_state("IN-USE"))
            .await
            .unwrap();
        assert_eq!(in_use.len(), 2);

        let both = repo
            .find_all(&DeviceFilter::default().with_brand("Apple").with_state("in-use"))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].name(), "iPhone");
    }

    #[tokio::test]
    async fn should_filter_non_ascii_brand_case_insensitively() {
        let repo = setup().await;
        repo.save(Device::create("Stol", "Ärlig", None).unwrap())
            .await
            .unwrap();
        repo.save(Device::create("Bord", "Arlig", None).unwrap())
            .await
            .unwrap();

        for brand in ["ärlig", "ÄRLIG"] {
            let found = repo
                .find_all(&DeviceFilter::default().with_brand(brand))
                .await
                .unwrap();
            assert_eq!(found.len(), 1, "{brand}");
            assert_eq!(found[0].brand(), "Ärlig");
        }
    }

    #[tokio::test]
    async fn should_return_empty_list_when_nothing_matches() {
        let repo = setup().await;
        repo.save(test_device()).await.unwrap();
        let none = repo
            .find_all(&DeviceFilter::default().with_brand("Nokia"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn should_update_device_when_exists() {
        let repo = setup().await;
        let mut device = test_device();
        repo.save(device.clone()).await.unwrap();

        device.set_name("iPhone 15 Pro").unwrap();
        device.set_brand("Apple Inc.").unwrap();
        device.set_state("inactive").unwrap();
        repo.update(device.clone()).await.unwrap();

        let fetched = repo.find_by_id(device.id()).await.unwrap().unwrap();
        assert_eq!(fetched.name(), "iPhone 15 Pro");
        assert_eq!(fetched.brand(), "Apple Inc.");
        assert_eq!(fetched.state(), DeviceState::Inactive);
        assert_eq!(fetched.creation_time(), device.creation_time());
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_device() {
        let repo = setup().await;
        let result = repo.update(test_device()).await;
        assert!(matches!(result, Err(DeviceHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_device_when_exists() {
        let repo = setup().await;
        let device = test_device();
        repo.save(device.clone()).await.unwrap();

        repo.delete(device.id()).await.unwrap();
        assert!(repo.find_by_id(device.id()).await.unwrap().is_none());

        let again = repo.delete(device.id()).await;
        assert!(matches!(again, Err(DeviceHubError::NotFound(_))));
    }
}
