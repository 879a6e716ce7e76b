use serde::Serialize;
use taskboard_domain::{
    filter_tasks, is_overdue, sort_tasks, Column, ColumnId, FilterState, Task, TaskId,
};

/// One rendered column: its visible tasks after filtering and sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub column: Column,
    pub tasks: Vec<Task>,
    /// Tasks in the column regardless of filters.
    pub total_count: usize,
    /// Advisory only, drops into a full column are allowed.
    pub over_limit: bool,
    /// Visible tasks past their deadline and not done.
    pub late: Vec<TaskId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn build(columns: &[Column], tasks: &[Task], filter: &FilterState) -> Self {
        let visible = sort_tasks(&filter_tasks(tasks, &filter.query()), filter.sort_direction);

        let columns = columns
            .iter()
            .map(|column| {
                let total_count = tasks.iter().filter(|t| t.column_id == column.id).count();
                let column_tasks: Vec<Task> = visible
                    .iter()
                    .filter(|t| t.column_id == column.id)
                    .cloned()
                    .collect();
                ColumnView {
                    column: column.clone(),
                    late: column_tasks.iter().filter(|t| is_overdue(t)).map(|t| t.id).collect(),
                    tasks: column_tasks,
                    total_count,
                    over_limit: column.is_over_limit(total_count),
                }
            })
            .collect();

        Self { columns }
    }

    pub fn column(&self, id: ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.column.id == id)
    }

    /// Number of tasks shown across all columns.
    pub fn visible_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }
}

/// Unfiltered task count per column, in column order.
pub fn column_task_counts(columns: &[Column], tasks: &[Task]) -> Vec<(ColumnId, usize)> {
    columns
        .iter()
        .map(|column| {
            let count = tasks.iter().filter(|t| t.column_id == column.id).count();
            (column.id, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use taskboard_domain::{Selection, SortDirection, TaskStatus};

    fn task(id: u32, column_id: ColumnId, hours: i64, title: &str) -> Task {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            status: if column_id == 1 { TaskStatus::Todo } else { TaskStatus::InProgress },
            created_at: base + Duration::hours(hours),
            expected_completion_at: base,
            completed_at: None,
            column_id,
            responsible_user_id: id % 2,
        }
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new(2, "Doing", TaskStatus::InProgress).with_limit(1),
            Column::new(1, "To do", TaskStatus::Todo),
        ]
    }

    fn tasks() -> Vec<Task> {
        vec![
            task(1, 1, 1, "Fix bug"),
            task(2, 1, 3, "Add feature"),
            task(3, 2, 2, "Fix another bug"),
            task(4, 2, 0, "Review"),
        ]
    }

    #[test]
    fn test_groups_by_column_in_column_order() {
        let view = BoardView::build(&columns(), &tasks(), &FilterState::default());

        assert_eq!(view.columns[0].column.id, 2);
        let todo: Vec<u32> = view.column(1).unwrap().tasks.iter().map(|t| t.id).collect();
        // newest first by default
        assert_eq!(todo, vec![2, 1]);
        assert_eq!(view.visible_count(), 4);
    }

    #[test]
    fn test_filters_keep_totals() {
        let filter = FilterState::default()
            .with_search("bug")
            .with_sort_direction(SortDirection::Ascending);
        let view = BoardView::build(&columns(), &tasks(), &filter);

        let doing = view.column(2).unwrap();
        assert_eq!(doing.tasks.len(), 1);
        assert_eq!(doing.total_count, 2);
        assert!(doing.over_limit);
        // deadlines are in the past, hidden tasks are not flagged
        assert_eq!(doing.late, vec![3]);
        assert_eq!(view.visible_count(), 2);
    }

    #[test]
    fn test_responsible_filter() {
        let filter = FilterState::default().with_responsible(Selection::Only(0));
        let view = BoardView::build(&columns(), &tasks(), &filter);
        assert!(view
            .columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .all(|t| t.responsible_user_id == 0));
        assert_eq!(view.visible_count(), 2);
    }

    #[test]
    fn test_column_task_counts() {
        assert_eq!(column_task_counts(&columns(), &tasks()), vec![(2, 2), (1, 2)]);
    }
}
