//! Shared query cache.
//!
//! Holds the authoritative column, task and user lists between gestures.
//! Every key carries an epoch that invalidation bumps, so a writer can detect
//! that the entry was invalidated after it captured the epoch.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use taskboard_domain::{Column, Task, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Columns,
    Tasks,
    Users,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Columns => write!(f, "columns"),
            QueryKey::Tasks => write!(f, "tasks"),
            QueryKey::Users => write!(f, "users"),
        }
    }
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<Arc<Vec<T>>>,
    epoch: u64,
    stale: bool,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            epoch: 0,
            stale: false,
        }
    }
}

impl<T> Slot<T> {
    fn write(&mut self, list: Vec<T>) -> Arc<Vec<T>> {
        let value = Arc::new(list);
        self.value = Some(Arc::clone(&value));
        self.stale = false;
        value
    }

    fn invalidate(&mut self) {
        self.epoch += 1;
        self.stale = true;
    }

    fn needs_fetch(&self) -> bool {
        self.value.is_none() || self.stale
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    columns: Slot<Column>,
    tasks: Slot<Task>,
    users: Slot<User>,
}

/// Cloneable handle; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current columns, stale or not.
    pub fn columns(&self) -> Option<Arc<Vec<Column>>> {
        self.inner.read().columns.value.clone()
    }

    pub fn tasks(&self) -> Option<Arc<Vec<Task>>> {
        self.inner.read().tasks.value.clone()
    }

    pub fn users(&self) -> Option<Arc<Vec<User>>> {
        self.inner.read().users.value.clone()
    }

    pub fn set_columns(&self, columns: Vec<Column>) -> Arc<Vec<Column>> {
        self.inner.write().columns.write(columns)
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) -> Arc<Vec<Task>> {
        self.inner.write().tasks.write(tasks)
    }

    pub fn set_users(&self, users: Vec<User>) -> Arc<Vec<User>> {
        self.inner.write().users.write(users)
    }

    /// Replace the task list with `f(current)` under one write lock.
    pub fn update_tasks(&self, f: impl FnOnce(&[Task]) -> Vec<Task>) -> Arc<Vec<Task>> {
        let mut inner = self.inner.write();
        let next = {
            let current = inner.tasks.value.as_deref().map(Vec::as_slice).unwrap_or(&[]);
            f(current)
        };
        inner.tasks.write(next)
    }

    pub fn update_users(&self, f: impl FnOnce(&[User]) -> Vec<User>) -> Arc<Vec<User>> {
        let mut inner = self.inner.write();
        let next = {
            let current = inner.users.value.as_deref().map(Vec::as_slice).unwrap_or(&[]);
            f(current)
        };
        inner.users.write(next)
    }

    /// Write `tasks` only if no invalidation happened since `epoch` was read.
    ///
    /// Returns whether the write landed.
    pub fn write_tasks_if_epoch(&self, tasks: Vec<Task>, epoch: u64) -> bool {
        let mut inner = self.inner.write();
        if inner.tasks.epoch != epoch {
            return false;
        }
        inner.tasks.write(tasks);
        true
    }

    /// Mark `key` stale so the next read refetches it.
    pub fn invalidate(&self, key: QueryKey) {
        let mut inner = self.inner.write();
        match key {
            QueryKey::Columns => inner.columns.invalidate(),
            QueryKey::Tasks => inner.tasks.invalidate(),
            QueryKey::Users => inner.users.invalidate(),
        }
        tracing::debug!("Invalidated {} query", key);
    }

    pub fn epoch(&self, key: QueryKey) -> u64 {
        let inner = self.inner.read();
        match key {
            QueryKey::Columns => inner.columns.epoch,
            QueryKey::Tasks => inner.tasks.epoch,
            QueryKey::Users => inner.users.epoch,
        }
    }

    pub fn needs_fetch(&self, key: QueryKey) -> bool {
        let inner = self.inner.read();
        match key {
            QueryKey::Columns => inner.columns.needs_fetch(),
            QueryKey::Tasks => inner.tasks.needs_fetch(),
            QueryKey::Users => inner.users.needs_fetch(),
        }
    }
}
