//! Remote data access.
//!
//! The board never talks to a real backend; [`MockGateway`] stands in for one
//! with seeded data and artificial latency.

mod mock;
pub mod seed;

pub use mock::MockGateway;

use async_trait::async_trait;
use taskboard_core::BoardResult;
use taskboard_domain::{Column, Task, TaskDraft, TaskId, TaskPatch, User, UserDraft};

/// Canonical source of columns, tasks and users.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn fetch_columns(&self) -> BoardResult<Vec<Column>>;

    async fn fetch_tasks(&self) -> BoardResult<Vec<Task>>;

    async fn fetch_users(&self) -> BoardResult<Vec<User>>;

    /// Apply `patch` to task `id`, returning the updated task. Can fail.
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> BoardResult<Task>;

    /// Create a task in the draft's column. Fails when the column is unknown.
    async fn create_task(&self, draft: TaskDraft) -> BoardResult<Task>;

    async fn create_user(&self, draft: UserDraft) -> BoardResult<User>;
}
