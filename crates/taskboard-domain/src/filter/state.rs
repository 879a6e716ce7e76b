//! Filter state store.
//!
//! Holds the board's filter dimensions, sort direction and pagination. Every
//! setter returns a fresh snapshot; `FilterStore` shares the current snapshot
//! between the engine and whoever renders the controls.

use parking_lot::RwLock;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use taskboard_core::Pagination;

use crate::filter::task_filter::TaskQuery;
use crate::sort::{SortDirection, SortField};
use crate::{Task, TaskStatus, UserId};

pub const DEFAULT_TASKS_PER_PAGE: usize = 10;

/// A filter dimension that is either disabled (`All`) or pinned to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        s.parse::<T>()
            .map(Selection::Only)
            .map_err(|e| e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub status: Selection<TaskStatus>,
    pub responsible: Selection<UserId>,
    pub search: String,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub tasks_per_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            status: Selection::All,
            responsible: Selection::All,
            search: String::new(),
            sort_by: SortField::CreatedAt,
            sort_direction: SortDirection::Descending,
            current_page: 1,
            tasks_per_page: DEFAULT_TASKS_PER_PAGE,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(self, status: Selection<TaskStatus>) -> Self {
        Self {
            status,
            current_page: 1,
            ..self
        }
    }

    pub fn with_responsible(self, responsible: Selection<UserId>) -> Self {
        Self {
            responsible,
            current_page: 1,
            ..self
        }
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            current_page: 1,
            ..self
        }
    }

    /// Changing the sort keeps the current page.
    pub fn with_sort_direction(self, sort_direction: SortDirection) -> Self {
        Self {
            sort_direction,
            ..self
        }
    }

    pub fn with_page(self, current_page: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            ..self
        }
    }

    /// Restore every dimension to its unfiltered default.
    pub fn reset(self) -> Self {
        Self {
            tasks_per_page: self.tasks_per_page,
            ..Self::default()
        }
    }

    /// Whether any filter dimension narrows the board. Sorting does not count.
    pub fn has_active_filters(&self) -> bool {
        !self.status.is_all() || !self.responsible.is_all() || !self.search.is_empty()
    }

    pub fn query(&self) -> TaskQuery {
        TaskQuery {
            status: self.status,
            responsible: self.responsible,
            search: self.search.clone(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page, self.tasks_per_page)
    }

    /// Tasks on the current page.
    pub fn paginate<'a>(&self, tasks: &'a [Task]) -> &'a [Task] {
        self.pagination().slice(tasks)
    }
}

/// Shared handle to the current filter snapshot.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    inner: Arc<RwLock<FilterState>>,
}

impl FilterStore {
    pub fn new(state: FilterState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub fn snapshot(&self) -> FilterState {
        self.inner.read().clone()
    }

    /// Replace the state with the snapshot produced by `f`, returning it.
    pub fn update(&self, f: impl FnOnce(FilterState) -> FilterState) -> FilterState {
        let mut guard = self.inner.write();
        let next = f(guard.clone());
        *guard = next.clone();
        next
    }

    pub fn set_status(&self, status: Selection<TaskStatus>) -> FilterState {
        self.update(|s| s.with_status(status))
    }

    pub fn set_responsible(&self, responsible: Selection<UserId>) -> FilterState {
        self.update(|s| s.with_responsible(responsible))
    }

    pub fn set_search(&self, search: impl Into<String>) -> FilterState {
        let search = search.into();
        self.update(|s| s.with_search(search))
    }

    pub fn set_sort_direction(&self, direction: SortDirection) -> FilterState {
        self.update(|s| s.with_sort_direction(direction))
    }

    pub fn set_page(&self, page: usize) -> FilterState {
        self.update(|s| s.with_page(page))
    }

    pub fn reset(&self) -> FilterState {
        self.update(FilterState::reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = FilterState::default();
        assert!(state.status.is_all());
        assert!(state.responsible.is_all());
        assert!(state.search.is_empty());
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.current_page, 1);
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_filter_setters_reset_page() {
        let state = FilterState::default().with_page(4);
        assert_eq!(state.clone().with_status(Selection::Only(TaskStatus::Done)).current_page, 1);
        assert_eq!(state.clone().with_responsible(Selection::Only(2)).current_page, 1);
        assert_eq!(state.with_search("bug").current_page, 1);
    }

    #[test]
    fn test_sort_setter_keeps_page() {
        let state = FilterState::default()
            .with_page(3)
            .with_sort_direction(SortDirection::Ascending);
        assert_eq!(state.current_page, 3);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_reset_restores_everything() {
        let state = FilterState::default()
            .with_status(Selection::Only(TaskStatus::Todo))
            .with_responsible(Selection::Only(3))
            .with_search("x")
            .with_sort_direction(SortDirection::Ascending)
            .with_page(2);
        assert!(state.has_active_filters());

        assert_eq!(state.reset(), FilterState::default());
    }

    #[test]
    fn test_store_shares_snapshots() {
        let store = FilterStore::default();
        let other = store.clone();

        let before = store.snapshot();
        store.set_search("deploy");

        assert_eq!(other.snapshot().search, "deploy");
        assert!(before.search.is_empty());

        other.reset();
        assert!(store.snapshot().search.is_empty());
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!("all".parse::<Selection<UserId>>(), Ok(Selection::All));
        assert_eq!("3".parse::<Selection<UserId>>(), Ok(Selection::Only(3)));
        assert_eq!(
            "in_progress".parse::<Selection<TaskStatus>>(),
            Ok(Selection::Only(TaskStatus::InProgress))
        );
        assert!("nope".parse::<Selection<UserId>>().is_err());
    }

    #[test]
    fn test_selection_admits() {
        assert!(Selection::<u32>::All.admits(&5));
        assert!(Selection::Only(5).admits(&5));
        assert!(!Selection::Only(5).admits(&6));
    }
}
