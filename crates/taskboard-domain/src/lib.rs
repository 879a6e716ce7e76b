pub mod column;
pub mod dashboard;
pub mod field_update;
pub mod filter;
pub mod lifecycle;
pub mod reorder;
pub mod settings;
pub mod sort;
pub mod status;
pub mod task;
pub mod user;

pub use column::{Column, ColumnId};
pub use dashboard::{Productivity, StatusCounts};
pub use field_update::FieldUpdate;
pub use filter::{filter_tasks, FilterState, FilterStore, Selection, TaskQuery};
pub use lifecycle::{derive_status_for_column, is_overdue};
pub use reorder::array_move;
pub use settings::{Settings, SettingsStore};
pub use sort::{sort_tasks, SortDirection, SortField};
pub use status::TaskStatus;
pub use task::{Task, TaskDraft, TaskId, TaskPatch};
pub use user::{User, UserDraft, UserId};
