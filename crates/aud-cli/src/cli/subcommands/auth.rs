use clap::{Args, Subcommand};

/// Session credential commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Store credentials issued by the identity provider.
    Login(AuthLoginArgs),
    /// Clear stored credentials.
    Logout,
    /// Show which identity requests will carry.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Bearer token.
    #[arg(long)]
    pub token: String,
    /// User id sent as `X-User-ID`.
    #[arg(long)]
    pub user_id: String,
    #[arg(long)]
    pub email: Option<String>,
}
