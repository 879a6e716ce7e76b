//! Task filtering functionality.
//!
//! Provides the filter predicates applied to the board and the filter state
//! store that parameterises them.

pub mod state;
pub mod task_filter;

pub use state::{FilterState, FilterStore, Selection};
pub use task_filter::{
    filter_tasks, CompositeFilter, ResponsibleFilter, SearchFilter, StatusFilter, TaskFilter,
    TaskQuery,
};
