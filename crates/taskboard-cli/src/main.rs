mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    taskboard_core::logging::init()?;

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "taskboard", &mut std::io::stdout());
        return Ok(());
    }

    let mut ctx = CliContext::load(&cli);

    match cli.command {
        Commands::Board(args) => handlers::board::handle_board(&ctx, args).await?,
        Commands::Tasks(args) => handlers::board::handle_tasks(&ctx, args).await?,
        Commands::MoveTask(args) => handlers::drag::handle_move_task(&mut ctx, args).await?,
        Commands::MoveColumn { column, over } => {
            handlers::drag::handle_move_column(&ctx, column, over).await?
        }
        Commands::AddTask(args) => handlers::task::handle_add_task(&ctx, args).await?,
        Commands::EditTask(args) => handlers::task::handle_edit_task(&ctx, args).await?,
        Commands::AddUser { name, email } => {
            handlers::user::handle_add_user(&ctx, name, email).await?
        }
        Commands::Users => handlers::user::handle_users(&ctx).await?,
        Commands::Dashboard => handlers::dashboard::handle_dashboard(&ctx).await?,
        Commands::SweepOverdue => handlers::task::handle_sweep_overdue(&ctx).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}
