//! Task sorting functionality.

use crate::Task;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// Enum dispatch for comparing tasks by a field.
pub enum SortBy {
    CreatedAt,
}

impl SortBy {
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

impl From<SortField> for SortBy {
    fn from(field: SortField) -> Self {
        match field {
            SortField::CreatedAt => SortBy::CreatedAt,
        }
    }
}

/// Applies a direction to a sort field.
pub struct OrderedSorter {
    sorter: SortBy,
    direction: SortDirection,
}

impl OrderedSorter {
    pub fn new(sorter: SortBy, direction: SortDirection) -> Self {
        Self { sorter, direction }
    }

    /// Stable in-place sort. Works with both `&Task` and `Task` elements.
    pub fn sort_by<T: Borrow<Task>>(&self, tasks: &mut [T]) {
        tasks.sort_by(|a, b| {
            let cmp = self.sorter.compare(a.borrow(), b.borrow());
            match self.direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        });
    }
}

/// Sorted copy of `tasks` by creation time; ties keep their input order.
pub fn sort_tasks(tasks: &[Task], direction: SortDirection) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    OrderedSorter::new(SortBy::CreatedAt, direction).sort_by(&mut sorted);
    sorted
}
