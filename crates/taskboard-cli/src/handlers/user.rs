use taskboard_domain::UserDraft;

use crate::context::CliContext;
use crate::output;

pub async fn handle_add_user(ctx: &CliContext, name: String, email: String) -> anyhow::Result<()> {
    match ctx.services.create_user(UserDraft { name, email }).await {
        Ok(user) => output::output_success(user),
        Err(e) => output::output_error(&e.to_string()),
    }
    Ok(())
}

pub async fn handle_users(ctx: &CliContext) -> anyhow::Result<()> {
    let users = ctx.client().users().await?;
    output::output_list(users.to_vec());
    Ok(())
}
