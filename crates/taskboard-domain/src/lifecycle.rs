//! Task lifecycle business rules.
//!
//! Pure functions tying a task's status and completion timestamp to the
//! column it sits in. Used by the drag engine and the CRUD flows alike.

use chrono::{DateTime, Utc};

use crate::{Column, ColumnId, Task, TaskStatus};

/// True iff the task is not done and its deadline has passed.
pub fn is_overdue(task: &Task) -> bool {
    is_overdue_at(task, Utc::now())
}

pub fn is_overdue_at(task: &Task, now: DateTime<Utc>) -> bool {
    task.status != TaskStatus::Done && now > task.expected_completion_at
}

/// Re-home `task` into `target_column_id`, adopting that column's status.
///
/// Returns the task unchanged when the column does not exist.
pub fn derive_status_for_column(task: &Task, target_column_id: ColumnId, columns: &[Column]) -> Task {
    derive_status_for_column_at(task, target_column_id, columns, Utc::now())
}

pub fn derive_status_for_column_at(
    task: &Task,
    target_column_id: ColumnId,
    columns: &[Column],
    now: DateTime<Utc>,
) -> Task {
    let Some(target) = columns.iter().find(|c| c.id == target_column_id) else {
        return task.clone();
    };

    let mut updated = Task {
        column_id: target_column_id,
        ..task.clone()
    };

    if target.column_type.is_done() {
        // Re-entering done keeps the original completion time
        if task.completed_at.is_none() {
            updated.completed_at = Some(now);
            updated.status = TaskStatus::Done;
        }
    } else {
        updated.completed_at = None;
        updated.status = target.column_type;
    }

    updated
}

/// Move every overdue task into the first overdue-type column.
///
/// Tasks already marked overdue are left where they are. Without an overdue
/// column the list is returned unchanged.
pub fn sweep_overdue(tasks: &[Task], columns: &[Column], now: DateTime<Utc>) -> Vec<Task> {
    let Some(overdue_column) = columns
        .iter()
        .find(|c| c.column_type == TaskStatus::Overdue)
    else {
        return tasks.to_vec();
    };

    tasks
        .iter()
        .map(|task| {
            if is_overdue_at(task, now) && task.status != TaskStatus::Overdue {
                Task {
                    status: TaskStatus::Overdue,
                    column_id: overdue_column.id,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Next sequential identifier: one past the largest, starting at 1.
pub fn next_id(ids: impl IntoIterator<Item = u32>) -> u32 {
    ids.into_iter().max().unwrap_or(0) + 1
}
