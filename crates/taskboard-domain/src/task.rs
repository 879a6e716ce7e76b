use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnId};
use crate::field_update::FieldUpdate;
use crate::status::TaskStatus;
use crate::user::UserId;

pub type TaskId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(alias = "expectedComplitionAt")]
    pub expected_completion_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub column_id: ColumnId,
    pub responsible_user_id: UserId,
}

impl Task {
    /// Build a task from a submitted draft, landing it in `column`.
    ///
    /// Status follows the column type; a task created straight into a done
    /// column is completed at `now`.
    pub fn from_draft(id: TaskId, draft: TaskDraft, column: &Column, now: DateTime<Utc>) -> Self {
        let completed_at = column.column_type.is_done().then_some(now);
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: column.column_type,
            created_at: now,
            expected_completion_at: draft.expected_completion_at,
            completed_at,
            column_id: column.id,
            responsible_user_id: draft.responsible_user_id,
        }
    }

    /// Whether the completion timestamp agrees with the status.
    pub fn is_completion_consistent(&self) -> bool {
        self.completed_at.is_some() == self.status.is_done()
    }

    pub fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(column_id) = patch.column_id {
            self.column_id = column_id;
        }
        if let Some(user_id) = patch.responsible_user_id {
            self.responsible_user_id = user_id;
        }
        if let Some(deadline) = patch.expected_completion_at {
            self.expected_completion_at = deadline;
        }
        patch.completed_at.apply_to(&mut self.completed_at);
    }
}

/// Fields submitted by the task form, for both create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub column_id: ColumnId,
    pub responsible_user_id: UserId,
    pub expected_completion_at: DateTime<Utc>,
}

impl TaskDraft {
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title),
            description: Some(self.description),
            column_id: Some(self.column_id),
            responsible_user_id: Some(self.responsible_user_id),
            expected_completion_at: Some(self.expected_completion_at),
            ..Default::default()
        }
    }
}

/// Partial update sent to the remote gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub column_id: Option<ColumnId>,
    pub responsible_user_id: Option<UserId>,
    pub expected_completion_at: Option<DateTime<Utc>>,
    pub completed_at: FieldUpdate<DateTime<Utc>>,
}

impl TaskPatch {
    /// The placement fields a drop commits: column, status and completion.
    pub fn placement_of(task: &Task) -> Self {
        Self {
            column_id: Some(task.column_id),
            status: Some(task.status),
            completed_at: task.completed_at.into(),
            ..Default::default()
        }
    }
}
