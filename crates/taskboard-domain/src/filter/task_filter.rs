//! Task filter implementations.
//!
//! Provides the TaskFilter trait and the status, responsible-user and text
//! search filters combined by the board view.

use crate::filter::state::Selection;
use crate::{Task, TaskStatus, UserId};

/// Trait for filtering tasks by various criteria.
pub trait TaskFilter {
    /// Returns true if the task matches the filter criteria.
    fn matches(&self, task: &Task) -> bool;
}

/// Filter tasks by workflow status.
pub struct StatusFilter {
    status: TaskStatus,
}

impl StatusFilter {
    pub fn new(status: TaskStatus) -> Self {
        Self { status }
    }
}

impl TaskFilter for StatusFilter {
    fn matches(&self, task: &Task) -> bool {
        task.status == self.status
    }
}

/// Filter tasks by the user responsible for them.
pub struct ResponsibleFilter {
    user_id: UserId,
}

impl ResponsibleFilter {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl TaskFilter for ResponsibleFilter {
    fn matches(&self, task: &Task) -> bool {
        task.responsible_user_id == self.user_id
    }
}

/// Case-insensitive substring search over title and description.
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl TaskFilter for SearchFilter {
    fn matches(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&self.query)
            || task.description.to_lowercase().contains(&self.query)
    }
}

/// Combine multiple filters with AND logic.
///
/// A task matches only if it passes all filters.
pub struct CompositeFilter {
    filters: Vec<Box<dyn TaskFilter>>,
}

impl CompositeFilter {
    /// Create an empty composite filter (matches all tasks).
    pub fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a filter to the composite (builder pattern).
    pub fn with_filter(mut self, filter: Box<dyn TaskFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskFilter for CompositeFilter {
    fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }
}

/// The three filter dimensions the board applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: Selection<TaskStatus>,
    pub responsible: Selection<UserId>,
    pub search: String,
}

impl TaskQuery {
    /// Build the composite filter for this query, skipping disabled dimensions.
    pub fn to_filter(&self) -> CompositeFilter {
        let mut filter = CompositeFilter::new();
        if let Selection::Only(status) = self.status {
            filter = filter.with_filter(Box::new(StatusFilter::new(status)));
        }
        if let Selection::Only(user_id) = self.responsible {
            filter = filter.with_filter(Box::new(ResponsibleFilter::new(user_id)));
        }
        if !self.search.is_empty() {
            filter = filter.with_filter(Box::new(SearchFilter::new(self.search.as_str())));
        }
        filter
    }
}

/// Keep the tasks matching every active dimension of `query`, in input order.
pub fn filter_tasks(tasks: &[Task], query: &TaskQuery) -> Vec<Task> {
    let filter = query.to_filter();
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}
