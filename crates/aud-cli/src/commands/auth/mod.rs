mod login;
mod logout;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `auditor auth <subcommand>`.
pub fn handle(action: &AuthCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, ctx, flags),
        AuthCommands::Logout => logout::handle(ctx, flags),
        AuthCommands::Status => status::handle(ctx, flags),
    }
}
