use serde::Serialize;
use taskboard_domain::{Column, ColumnId, Settings, Task};
use taskboard_engine::{DragEvent, DragPayload, DragSubject, Notification};

use crate::cli::MoveTaskArgs;
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct TaskMoved {
    task: Option<Task>,
    generation: u64,
    notifications: Vec<Notification>,
}

#[derive(Serialize)]
struct ColumnsMoved {
    columns: Vec<Column>,
}

/// Replay a full task gesture: pick up, hover over the target, drop.
pub async fn handle_move_task(ctx: &mut CliContext, args: MoveTaskArgs) -> anyhow::Result<()> {
    ctx.load_board().await?;
    let Some(task) = ctx.engine.task(args.task) else {
        output::output_error(&format!("Task {} not found", args.task));
    };

    let over = match (args.to_column, args.over_task) {
        (Some(column_id), _) => DragSubject::Column(column_id),
        (None, Some(task_id)) => DragSubject::Task(task_id),
        (None, None) => output::output_error("Either --to-column or --over-task is required"),
    };

    if args.fail {
        ctx.gateway.set_fail_updates(true);
    }

    let event = DragEvent::new(DragSubject::Task(task.id), over);
    ctx.engine.on_drag_start(DragPayload::Task(task));
    ctx.engine.on_drag_over(event);
    ctx.engine.on_drag_end(event);
    ctx.settle().await;

    let generation = ctx.engine.latest_generation().0;
    let moved = TaskMoved {
        task: ctx.engine.task(args.task),
        generation,
        notifications: ctx.drain_notifications(),
    };
    output::output_success(moved);
    Ok(())
}

pub async fn handle_move_column(
    ctx: &CliContext,
    column_id: ColumnId,
    over: ColumnId,
) -> anyhow::Result<()> {
    ctx.load_board().await?;
    let Some(column) = ctx.engine.columns().iter().find(|c| c.id == column_id).cloned() else {
        output::output_error(&format!("Column {} not found", column_id));
    };

    ctx.engine.settings().update(|s| Settings {
        can_move_columns: true,
        ..s
    });

    let event = DragEvent::new(DragSubject::Column(column_id), DragSubject::Column(over));
    ctx.engine.on_drag_start(DragPayload::Column(column));
    ctx.engine.on_drag_over(event);
    ctx.engine.on_drag_end(event);
    ctx.settle().await;

    output::output_success(ColumnsMoved {
        columns: ctx.engine.columns().to_vec(),
    });
    Ok(())
}
