use aud_core::Credentials;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    stored: bool,
    user_id: String,
    email: Option<String>,
    session_path: Option<String>,
}

pub fn handle(args: &AuthLoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let credentials = Credentials::new(
        args.token.as_str(),
        args.user_id.as_str(),
        args.email.clone(),
        chrono::Utc::now().timestamp_millis(),
    )?;
    let response = AuthLoginResponse {
        stored: true,
        user_id: credentials.user_id().to_string(),
        email: credentials.email().map(str::to_string),
        session_path: ctx
            .session_path
            .as_ref()
            .map(|path| path.display().to_string()),
    };
    ctx.store().set(credentials);
    tracing::info!(user_id = %response.user_id, "credentials stored");
    output(&response, flags.format)
}
