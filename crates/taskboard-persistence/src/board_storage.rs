//! Typed access to the board's durable keys.
//!
//! Tasks, column order and users each live under a fixed key of a
//! [`KeyValueStore`]. Values that fail to decode are reported as absent so the
//! caller falls back to the remote gateway.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use taskboard_core::BoardResult;
use taskboard_domain::{ColumnId, Task, User};

use crate::serialization::JsonSerializer;
use crate::traits::{KeyValueStore, Serializer};

pub const TASKS_KEY: &str = "kanban_tasks";
pub const COLUMNS_ORDER_KEY: &str = "kanban_columns_order";
pub const USERS_KEY: &str = "kanban_users";

#[derive(Clone)]
pub struct BoardStorage {
    store: Arc<dyn KeyValueStore>,
}

impl BoardStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub async fn load_tasks(&self) -> BoardResult<Option<Vec<Task>>> {
        self.load(TASKS_KEY).await
    }

    pub async fn store_tasks(&self, tasks: &[Task]) -> BoardResult<()> {
        self.save(TASKS_KEY, &tasks.to_vec()).await?;
        tracing::info!("Persisted {} tasks", tasks.len());
        Ok(())
    }

    pub async fn clear_tasks(&self) -> BoardResult<()> {
        self.store.remove(TASKS_KEY).await
    }

    pub async fn load_column_order(&self) -> BoardResult<Option<Vec<ColumnId>>> {
        self.load(COLUMNS_ORDER_KEY).await
    }

    pub async fn store_column_order(&self, order: &[ColumnId]) -> BoardResult<()> {
        self.save(COLUMNS_ORDER_KEY, &order.to_vec()).await?;
        tracing::info!("Persisted column order {:?}", order);
        Ok(())
    }

    pub async fn clear_column_order(&self) -> BoardResult<()> {
        self.store.remove(COLUMNS_ORDER_KEY).await
    }

    pub async fn load_users(&self) -> BoardResult<Option<Vec<User>>> {
        self.load(USERS_KEY).await
    }

    pub async fn store_users(&self, users: &[User]) -> BoardResult<()> {
        self.save(USERS_KEY, &users.to_vec()).await?;
        tracing::info!("Persisted {} users", users.len());
        Ok(())
    }

    async fn load<T>(&self, key: &str) -> BoardResult<Option<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };

        match Serializer::<T>::deserialize(&JsonSerializer, &raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring corrupt data under {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn save<T>(&self, key: &str, value: &T) -> BoardResult<()>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let bytes = Serializer::<T>::serialize(&JsonSerializer, value)?;
        self.store.set(key, bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use chrono::{TimeZone, Utc};
    use taskboard_domain::TaskStatus;
    use tempfile::tempdir;

    fn sample_task(id: u32) -> Task {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Task {
            id,
            title: format!("Task {}", id),
            description: "desc".to_string(),
            status: TaskStatus::Todo,
            created_at: created,
            expected_completion_at: created,
            completed_at: None,
            column_id: 1,
            responsible_user_id: 1,
        }
    }

    fn memory_storage() -> (MemoryStore, BoardStorage) {
        let store = MemoryStore::new();
        let storage = BoardStorage::new(Arc::new(store.clone()));
        (store, storage)
    }

    #[tokio::test]
    async fn test_absent_keys_load_as_none() {
        let (_, storage) = memory_storage();
        assert!(storage.load_tasks().await.unwrap().is_none());
        assert!(storage.load_column_order().await.unwrap().is_none());
        assert!(storage.load_users().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tasks_round_trip() {
        let (_, storage) = memory_storage();
        let tasks = vec![sample_task(1), sample_task(2)];

        storage.store_tasks(&tasks).await.unwrap();
        assert_eq!(storage.load_tasks().await.unwrap(), Some(tasks));

        storage.clear_tasks().await.unwrap();
        assert!(storage.load_tasks().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_column_order_uses_fixed_key() {
        let (store, storage) = memory_storage();
        storage.store_column_order(&[3, 1, 2]).await.unwrap();

        assert_eq!(
            store.get(COLUMNS_ORDER_KEY).await.unwrap().as_deref(),
            Some(&b"[3,1,2]"[..])
        );
        assert_eq!(storage.load_column_order().await.unwrap(), Some(vec![3, 1, 2]));
    }

    #[tokio::test]
    async fn test_corrupt_json_is_treated_as_absent() {
        let (store, storage) = memory_storage();
        store.set(TASKS_KEY, b"{not json".to_vec()).await.unwrap();
        store.set(USERS_KEY, b"42".to_vec()).await.unwrap();

        assert!(storage.load_tasks().await.unwrap().is_none());
        assert!(storage.load_users().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_utf8_file_is_treated_as_absent() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("kanban_tasks.json"), [0xff, 0xfe, 0x00]).unwrap();

        let storage = BoardStorage::new(Arc::new(JsonFileStore::new(dir.path())));
        assert!(storage.load_tasks().await.unwrap().is_none());

        storage.store_tasks(&[sample_task(1)]).await.unwrap();
        assert_eq!(storage.load_tasks().await.unwrap(), Some(vec![sample_task(1)]));
    }

    #[tokio::test]
    async fn test_file_backed_storage_survives_reopen() {
        let dir = tempdir().unwrap();
        let users = vec![User {
            id: 1,
            name: "Ana Costa".to_string(),
            email: "ana.costa@example.com".to_string(),
        }];

        {
            let storage = BoardStorage::new(Arc::new(JsonFileStore::new(dir.path())));
            storage.store_users(&users).await.unwrap();
        }

        let reopened = BoardStorage::new(Arc::new(JsonFileStore::new(dir.path())));
        assert_eq!(reopened.load_users().await.unwrap(), Some(users));
        assert!(dir.path().join("kanban_users.json").exists());
    }
}
