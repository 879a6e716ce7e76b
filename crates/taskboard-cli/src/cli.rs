use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_domain::{ColumnId, Selection, SortDirection, TaskId, TaskStatus, UserId};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A kanban task board with drag-and-drop reconciliation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the board data (or set TASKBOARD_DATA_DIR env var)
    #[arg(long, value_name = "DIR", env = "TASKBOARD_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Skip the simulated network latency
    #[arg(long, global = true)]
    pub fast: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the board, column by column
    Board(FilterArgs),
    /// List filtered tasks one page at a time
    Tasks(TaskListArgs),
    /// Drag a task onto a column or another task
    MoveTask(MoveTaskArgs),
    /// Drag a column onto another column
    MoveColumn {
        #[arg(long)]
        column: ColumnId,
        #[arg(long)]
        over: ColumnId,
    },
    /// Create a task
    AddTask(AddTaskArgs),
    /// Edit a task
    EditTask(EditTaskArgs),
    /// Create a user
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// List users
    Users,
    /// Show completion metrics
    Dashboard,
    /// Move late tasks into the overdue column
    SweepOverdue,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// todo, in_progress, overdue, done or all
    #[arg(long)]
    pub status: Option<Selection<TaskStatus>>,
    /// Responsible user id or all
    #[arg(long)]
    pub responsible: Option<Selection<UserId>>,
    /// Case-insensitive text in title or description
    #[arg(long)]
    pub search: Option<String>,
    /// asc or desc by creation date
    #[arg(long)]
    pub sort: Option<SortDirection>,
}

#[derive(Args)]
pub struct TaskListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long)]
    pub per_page: Option<usize>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["to_column", "over_task"])))]
pub struct MoveTaskArgs {
    #[arg(long)]
    pub task: TaskId,
    /// Drop onto this column
    #[arg(long)]
    pub to_column: Option<ColumnId>,
    /// Drop onto this task, taking its place
    #[arg(long)]
    pub over_task: Option<TaskId>,
    /// Make the remote update fail
    #[arg(long)]
    pub fail: bool,
}

#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub column: ColumnId,
    #[arg(long)]
    pub user: UserId,
    /// Deadline, RFC 3339 (defaults to a week from now)
    #[arg(long)]
    pub due: Option<DateTime<Utc>>,
}

#[derive(Args)]
pub struct EditTaskArgs {
    #[arg(long)]
    pub id: TaskId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub column: Option<ColumnId>,
    #[arg(long)]
    pub user: Option<UserId>,
    #[arg(long)]
    pub due: Option<DateTime<Utc>>,
}
