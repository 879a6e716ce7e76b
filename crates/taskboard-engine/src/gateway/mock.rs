use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use taskboard_core::{BoardError, BoardResult, TimingConfig};
use taskboard_domain::lifecycle::next_id;
use taskboard_domain::{Column, Task, TaskDraft, TaskId, TaskPatch, User, UserDraft};
use taskboard_persistence::BoardStorage;

use super::{seed, RemoteGateway};

/// Simulated backend serving seeded data after a fixed delay per call.
///
/// When backed by a [`BoardStorage`], tasks and users saved by earlier
/// sessions are visible to id assignment and updates, the way a real backend
/// would know about them.
pub struct MockGateway {
    timing: TimingConfig,
    columns: Vec<Column>,
    tasks: RwLock<Vec<Task>>,
    users: RwLock<Vec<User>>,
    storage: Option<BoardStorage>,
    fail_updates: AtomicBool,
    update_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new(timing: TimingConfig) -> Self {
        Self::with_data(timing, seed::columns(), seed::tasks(), seed::users())
    }

    pub fn with_data(
        timing: TimingConfig,
        columns: Vec<Column>,
        tasks: Vec<Task>,
        users: Vec<User>,
    ) -> Self {
        Self {
            timing,
            columns,
            tasks: RwLock::new(tasks),
            users: RwLock::new(users),
            storage: None,
            fail_updates: AtomicBool::new(false),
            update_calls: AtomicUsize::new(0),
        }
    }

    pub fn backed_by(mut self, storage: BoardStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Make every subsequent `update_task` call reject.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    async fn delay(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    async fn stored_tasks(&self) -> BoardResult<Vec<Task>> {
        match &self.storage {
            Some(storage) => Ok(storage.load_tasks().await?.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    async fn stored_users(&self) -> BoardResult<Vec<User>> {
        match &self.storage {
            Some(storage) => Ok(storage.load_users().await?.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    async fn find_task(&self, id: TaskId) -> BoardResult<Task> {
        // Stored copies are newer than the seed
        if let Some(task) = self.stored_tasks().await?.into_iter().find(|t| t.id == id) {
            return Ok(task);
        }
        self.tasks
            .read()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| BoardError::NotFound(format!("Task {} not found", id)))
    }

    fn remember_task(&self, task: &Task) {
        let mut tasks = self.tasks.write();
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task.clone(),
            None => tasks.push(task.clone()),
        }
    }
}

#[async_trait]
impl RemoteGateway for MockGateway {
    async fn fetch_columns(&self) -> BoardResult<Vec<Column>> {
        Self::delay(self.timing.columns_latency()).await;
        Ok(self.columns.clone())
    }

    async fn fetch_tasks(&self) -> BoardResult<Vec<Task>> {
        Self::delay(self.timing.tasks_latency()).await;
        Ok(self.tasks.read().clone())
    }

    async fn fetch_users(&self) -> BoardResult<Vec<User>> {
        Self::delay(self.timing.users_latency()).await;
        Ok(self.users.read().clone())
    }

    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> BoardResult<Task> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Self::delay(self.timing.update_latency()).await;

        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(BoardError::Remote(format!("Update of task {} rejected", id)));
        }

        let mut task = self.find_task(id).await?;
        task.apply_patch(patch);
        self.remember_task(&task);
        tracing::debug!("Gateway updated task {}", id);
        Ok(task)
    }

    async fn create_task(&self, draft: TaskDraft) -> BoardResult<Task> {
        Self::delay(self.timing.create_latency()).await;

        let column = self
            .columns
            .iter()
            .find(|c| c.id == draft.column_id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {} not found", draft.column_id)))?;

        let stored = self.stored_tasks().await?;
        let id = {
            let known = self.tasks.read();
            next_id(known.iter().chain(stored.iter()).map(|t| t.id))
        };

        let task = Task::from_draft(id, draft, column, Utc::now());
        self.remember_task(&task);
        Ok(task)
    }

    async fn create_user(&self, draft: UserDraft) -> BoardResult<User> {
        Self::delay(self.timing.create_latency()).await;

        let stored = self.stored_users().await?;
        let user = {
            let mut users = self.users.write();
            let id = next_id(users.iter().chain(stored.iter()).map(|u| u.id));
            let user = User::from_draft(id, draft);
            users.push(user.clone());
            user
        };
        Ok(user)
    }
}
