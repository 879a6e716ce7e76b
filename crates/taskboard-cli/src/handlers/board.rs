use serde::Serialize;
use taskboard_domain::{filter_tasks, sort_tasks, FilterState, Task};

use crate::cli::{FilterArgs, TaskListArgs};
use crate::context::CliContext;
use crate::output;

#[derive(Serialize)]
struct TaskPage {
    tasks: Vec<Task>,
    page: usize,
    total_pages: usize,
    total_matching: usize,
    filters_active: bool,
}

pub async fn handle_board(ctx: &CliContext, args: FilterArgs) -> anyhow::Result<()> {
    ctx.load_board().await?;
    let filter = ctx.apply_filters(args);
    output::output_success(ctx.engine.board_view(&filter));
    Ok(())
}

pub async fn handle_tasks(ctx: &CliContext, args: TaskListArgs) -> anyhow::Result<()> {
    ctx.load_board().await?;
    ctx.apply_filters(args.filter);
    let filter = ctx.filters.update(|state| {
        let per_page = args.per_page.unwrap_or(state.tasks_per_page).max(1);
        FilterState {
            tasks_per_page: per_page,
            ..state
        }
        .with_page(args.page)
    });

    output::output_success(page_of(&ctx.engine.tasks(), &filter));
    Ok(())
}

fn page_of(tasks: &[Task], filter: &FilterState) -> TaskPage {
    let visible = sort_tasks(&filter_tasks(tasks, &filter.query()), filter.sort_direction);
    let info = filter.pagination().page_info(visible.len());
    TaskPage {
        tasks: filter.paginate(&visible).to_vec(),
        page: info.current_page,
        total_pages: info.total_pages,
        total_matching: visible.len(),
        filters_active: filter.has_active_filters(),
    }
}
