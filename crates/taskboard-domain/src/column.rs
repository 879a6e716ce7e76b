use serde::{Deserialize, Serialize};

use crate::status::TaskStatus;

pub type ColumnId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Status a task adopts when dropped into this column.
    #[serde(rename = "type")]
    pub column_type: TaskStatus,
    /// Advisory work-in-progress limit, 0 means unbounded.
    #[serde(default)]
    pub limit: u32,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>, column_type: TaskStatus) -> Self {
        Self {
            id,
            title: title.into(),
            column_type,
            limit: 0,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// True when `task_count` exceeds a non-zero limit. Never enforced.
    pub fn is_over_limit(&self, task_count: usize) -> bool {
        self.limit > 0 && task_count > self.limit as usize
    }
}
