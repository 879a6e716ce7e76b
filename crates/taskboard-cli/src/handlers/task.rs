use chrono::{Duration, Utc};
use serde::Serialize;
use taskboard_domain::TaskDraft;

use crate::cli::{AddTaskArgs, EditTaskArgs};
use crate::context::CliContext;
use crate::output;

const DEFAULT_DUE_DAYS: i64 = 7;

#[derive(Serialize)]
struct Swept {
    moved: usize,
}

pub async fn handle_add_task(ctx: &CliContext, args: AddTaskArgs) -> anyhow::Result<()> {
    let draft = TaskDraft {
        title: args.title,
        description: args.description,
        column_id: args.column,
        responsible_user_id: args.user,
        expected_completion_at: args
            .due
            .unwrap_or_else(|| Utc::now() + Duration::days(DEFAULT_DUE_DAYS)),
    };

    match ctx.services.create_task(draft).await {
        Ok(task) => output::output_success(task),
        Err(e) => output::output_error(&e.to_string()),
    }
    Ok(())
}

/// Fields left out keep their current value.
pub async fn handle_edit_task(ctx: &CliContext, args: EditTaskArgs) -> anyhow::Result<()> {
    ctx.load_board().await?;
    let Some(current) = ctx.engine.task(args.id) else {
        output::output_error(&format!("Task {} not found", args.id));
    };

    let draft = TaskDraft {
        title: args.title.unwrap_or(current.title),
        description: args.description.unwrap_or(current.description),
        column_id: args.column.unwrap_or(current.column_id),
        responsible_user_id: args.user.unwrap_or(current.responsible_user_id),
        expected_completion_at: args.due.unwrap_or(current.expected_completion_at),
    };

    match ctx.services.edit_task(args.id, draft).await {
        Ok(task) => output::output_success(task),
        Err(e) => output::output_error(&e.to_string()),
    }
    Ok(())
}

pub async fn handle_sweep_overdue(ctx: &CliContext) -> anyhow::Result<()> {
    let moved = ctx.services.sweep_overdue().await?;
    output::output_success(Swept { moved });
    Ok(())
}
