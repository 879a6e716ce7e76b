//! Task and user forms.
//!
//! These flows write the shared cache and storage directly, independently of
//! the drag engine. Writes are last-write-wins.

use chrono::Utc;
use taskboard_core::{BoardError, BoardResult};
use taskboard_domain::lifecycle::sweep_overdue;
use taskboard_domain::{derive_status_for_column, Task, TaskDraft, TaskId, TaskPatch, User, UserDraft};
use tokio::sync::mpsc;

use crate::client::QueryClient;
use crate::notification::Notification;

#[derive(Clone)]
pub struct BoardServices {
    client: QueryClient,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl BoardServices {
    pub fn new(client: QueryClient, notifications: mpsc::UnboundedSender<Notification>) -> Self {
        Self {
            client,
            notifications,
        }
    }

    pub async fn create_task(&self, draft: TaskDraft) -> BoardResult<Task> {
        // Make sure the new task is appended to the full list
        self.client.tasks().await?;

        let task = match self.client.gateway().create_task(draft).await {
            Ok(task) => task,
            Err(e) => {
                tracing::error!("Error creating task: {}", e);
                self.notify(Notification::Error("Failed to create task. Please try again.".to_string()));
                return Err(e);
            }
        };

        let tasks = self.client.cache().update_tasks(|tasks| {
            let mut next = tasks.to_vec();
            next.push(task.clone());
            next
        });
        self.client.storage().store_tasks(&tasks).await?;

        tracing::info!("Created task {} in column {}", task.id, task.column_id);
        self.notify(Notification::Success(format!("Task \"{}\" created", task.title)));
        Ok(task)
    }

    /// Apply the form fields to task `id`. Moving it to another column
    /// re-derives its status the way a drop would.
    pub async fn edit_task(&self, id: TaskId, draft: TaskDraft) -> BoardResult<Task> {
        let (columns, tasks) = self.client.load_board().await?;
        let current = tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| BoardError::NotFound(format!("Task {} not found", id)))?;

        if !columns.iter().any(|c| c.id == draft.column_id) {
            return Err(BoardError::Validation(format!(
                "Column {} does not exist",
                draft.column_id
            )));
        }

        let placement = if draft.column_id != current.column_id {
            TaskPatch::placement_of(&derive_status_for_column(&current, draft.column_id, &columns))
        } else {
            TaskPatch::default()
        };
        let patch = TaskPatch {
            status: placement.status,
            completed_at: placement.completed_at,
            ..draft.into_patch()
        };

        let updated = match self.client.gateway().update_task(id, patch).await {
            Ok(task) => task,
            Err(e) => {
                tracing::error!("Error updating task {}: {}", id, e);
                self.notify(Notification::Error("Failed to update task. Please try again.".to_string()));
                return Err(e);
            }
        };

        let tasks = self.client.cache().update_tasks(|tasks| {
            tasks
                .iter()
                .map(|t| if t.id == updated.id { updated.clone() } else { t.clone() })
                .collect()
        });
        self.client.storage().store_tasks(&tasks).await?;

        tracing::info!("Updated task {}", id);
        self.notify(Notification::Success(format!("Task \"{}\" updated", updated.title)));
        Ok(updated)
    }

    pub async fn create_user(&self, draft: UserDraft) -> BoardResult<User> {
        self.client.users().await?;

        let user = match self.client.gateway().create_user(draft).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Error creating user: {}", e);
                self.notify(Notification::Error("Failed to create user. Please try again.".to_string()));
                return Err(e);
            }
        };

        let users = self.client.cache().update_users(|users| {
            let mut next = users.to_vec();
            next.push(user.clone());
            next
        });
        self.client.storage().store_users(&users).await?;

        tracing::info!("Created user {}", user.id);
        self.notify(Notification::Success(format!("User \"{}\" created", user.name)));
        Ok(user)
    }

    /// Move overdue tasks into the overdue column. Returns how many moved.
    pub async fn sweep_overdue(&self) -> BoardResult<usize> {
        let (columns, tasks) = self.client.load_board().await?;
        let swept = sweep_overdue(&tasks, &columns, Utc::now());

        let moved = swept.iter().zip(tasks.iter()).filter(|(a, b)| a != b).count();
        if moved == 0 {
            return Ok(0);
        }

        self.client.storage().store_tasks(&swept).await?;
        self.client.cache().set_tasks(swept);
        tracing::info!("Moved {} overdue tasks", moved);
        Ok(moved)
    }

    fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifications.send(notification) {
            tracing::debug!("Notification dropped, no listener: {:?}", e.0);
        }
    }
}
