use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags),
        Commands::Relay => commands::relay::handle(ctx).await,
        Commands::Declaration(args) => commands::declaration::handle(&args, ctx, flags).await,
        Commands::Rut { action } => commands::rut::handle(&action, ctx, flags).await,
        Commands::Invoice(args) => commands::invoice::handle(&args, ctx, flags).await,
        Commands::Calendar { action } => commands::calendar::handle(&action, ctx, flags).await,
        Commands::ThirdParty { action } => commands::third_party::handle(&action, ctx, flags).await,
        Commands::AccountingClients => commands::accounting::handle(ctx, flags).await,
    }
}
