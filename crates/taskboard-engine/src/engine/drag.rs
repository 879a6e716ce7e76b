//! Drag gesture events and the list transformations they drive.

use std::fmt;

use taskboard_domain::{array_move, derive_status_for_column, Column, ColumnId, Task, TaskId};

/// Entity captured when a gesture starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    Column(Column),
    Task(Task),
}

/// The entity currently being dragged.
pub type ActiveDrag = DragPayload;

impl DragPayload {
    pub fn subject(&self) -> DragSubject {
        match self {
            DragPayload::Column(column) => DragSubject::Column(column.id),
            DragPayload::Task(task) => DragSubject::Task(task.id),
        }
    }
}

/// Identity of a draggable or droppable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragSubject {
    Column(ColumnId),
    Task(TaskId),
}

impl fmt::Display for DragSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragSubject::Column(id) => write!(f, "column {}", id),
            DragSubject::Task(id) => write!(f, "task {}", id),
        }
    }
}

/// Hover or drop of `active` onto `over`. `over` is `None` outside any target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEvent {
    pub active: DragSubject,
    pub over: Option<DragSubject>,
}

impl DragEvent {
    pub fn new(active: DragSubject, over: DragSubject) -> Self {
        Self {
            active,
            over: Some(over),
        }
    }

    pub fn outside(active: DragSubject) -> Self {
        Self { active, over: None }
    }
}

/// Monotonic id of a task commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generation {}", self.0)
    }
}

fn position_of(tasks: &[Task], id: TaskId) -> Option<usize> {
    tasks.iter().position(|t| t.id == id)
}

/// Hovering a task over another task: adopt the hovered task's column and
/// take its index. When either task is missing the list is only reordered,
/// with the missing index standing for the last slot.
pub(crate) fn move_over_task(
    tasks: &[Task],
    active_id: TaskId,
    over_id: TaskId,
    columns: &[Column],
) -> Vec<Task> {
    match (position_of(tasks, active_id), position_of(tasks, over_id)) {
        (Some(active_index), Some(over_index)) => {
            let target_column = tasks[over_index].column_id;
            let mut updated = tasks.to_vec();
            updated[active_index] = derive_status_for_column(&tasks[active_index], target_column, columns);
            array_move(&updated, active_index, over_index)
        }
        (active_index, over_index) => {
            tracing::debug!("Task {} or {} not on the board", active_id, over_id);
            let Some(last) = tasks.len().checked_sub(1) else {
                return Vec::new();
            };
            array_move(tasks, active_index.unwrap_or(last), over_index.unwrap_or(last))
        }
    }
}

/// Hovering a task over a column: adopt the column in place.
pub(crate) fn move_over_column(
    tasks: &[Task],
    active_id: TaskId,
    column_id: ColumnId,
    columns: &[Column],
) -> Vec<Task> {
    let mut updated = tasks.to_vec();
    match position_of(tasks, active_id) {
        Some(index) => updated[index] = derive_status_for_column(&tasks[index], column_id, columns),
        None => tracing::debug!("Task {} not on the board", active_id),
    }
    updated
}
