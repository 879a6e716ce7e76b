//! Query resolution on top of the cache.
//!
//! Reads come from the cache while it is fresh. Otherwise the client combines
//! the remote gateway with whatever durable storage holds and writes the result
//! back to the cache.

use std::sync::Arc;

use taskboard_core::BoardResult;
use taskboard_domain::{Column, ColumnId, Task, User};
use taskboard_persistence::BoardStorage;

use crate::cache::{QueryCache, QueryKey};
use crate::gateway::RemoteGateway;

#[derive(Clone)]
pub struct QueryClient {
    gateway: Arc<dyn RemoteGateway>,
    storage: BoardStorage,
    cache: QueryCache,
}

impl QueryClient {
    pub fn new(gateway: Arc<dyn RemoteGateway>, storage: BoardStorage, cache: QueryCache) -> Self {
        Self {
            gateway,
            storage,
            cache,
        }
    }

    pub fn gateway(&self) -> &Arc<dyn RemoteGateway> {
        &self.gateway
    }

    pub fn storage(&self) -> &BoardStorage {
        &self.storage
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn columns(&self) -> BoardResult<Arc<Vec<Column>>> {
        match self.cache.columns() {
            Some(columns) if !self.cache.needs_fetch(QueryKey::Columns) => Ok(columns),
            _ => self.refetch_columns().await,
        }
    }

    pub async fn tasks(&self) -> BoardResult<Arc<Vec<Task>>> {
        match self.cache.tasks() {
            Some(tasks) if !self.cache.needs_fetch(QueryKey::Tasks) => Ok(tasks),
            _ => self.refetch_tasks().await,
        }
    }

    pub async fn users(&self) -> BoardResult<Arc<Vec<User>>> {
        match self.cache.users() {
            Some(users) if !self.cache.needs_fetch(QueryKey::Users) => Ok(users),
            _ => self.refetch_users().await,
        }
    }

    /// Gateway columns, reordered by the saved column order when it still
    /// covers exactly the gateway's columns.
    pub async fn refetch_columns(&self) -> BoardResult<Arc<Vec<Column>>> {
        let columns = self.gateway.fetch_columns().await?;
        let order = self.storage.load_column_order().await?;
        let columns = match order {
            Some(order) => apply_column_order(columns, &order),
            None => columns,
        };
        tracing::debug!("Fetched {} columns", columns.len());
        Ok(self.cache.set_columns(columns))
    }

    /// Stored tasks when there are any, otherwise the gateway's (saved for
    /// next time). A failed fetch yields an empty board.
    pub async fn refetch_tasks(&self) -> BoardResult<Arc<Vec<Task>>> {
        let tasks = match self.storage.load_tasks().await? {
            Some(stored) if !stored.is_empty() => stored,
            _ => match self.gateway.fetch_tasks().await {
                Ok(fetched) => {
                    self.storage.store_tasks(&fetched).await?;
                    fetched
                }
                Err(e) => {
                    tracing::error!("Failed to fetch tasks: {}", e);
                    Vec::new()
                }
            },
        };
        tracing::debug!("Resolved {} tasks", tasks.len());
        Ok(self.cache.set_tasks(tasks))
    }

    pub async fn refetch_users(&self) -> BoardResult<Arc<Vec<User>>> {
        let users = match self.storage.load_users().await? {
            Some(stored) => stored,
            None => {
                let fetched = self.gateway.fetch_users().await?;
                self.storage.store_users(&fetched).await?;
                fetched
            }
        };
        Ok(self.cache.set_users(users))
    }

    /// Load columns and tasks together, as the board does on open.
    pub async fn load_board(&self) -> BoardResult<(Arc<Vec<Column>>, Arc<Vec<Task>>)> {
        let (columns, tasks) = tokio::join!(self.columns(), self.tasks());
        Ok((columns?, tasks?))
    }
}

/// Reorder `columns` by `order` when `order` is a permutation of their ids.
pub fn apply_column_order(columns: Vec<Column>, order: &[ColumnId]) -> Vec<Column> {
    if order.len() != columns.len() {
        return columns;
    }

    let ordered: Vec<Column> = order
        .iter()
        .filter_map(|id| columns.iter().find(|c| c.id == *id).cloned())
        .collect();

    let is_permutation = ordered.len() == columns.len()
        && columns.iter().all(|c| ordered.iter().any(|o| o.id == c.id));
    if is_permutation {
        ordered
    } else {
        tracing::warn!("Ignoring saved column order {:?}", order);
        columns
    }
}
