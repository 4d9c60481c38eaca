use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    token_source: Option<String>,
    user_id: Option<String>,
    email: Option<String>,
    captured_at: Option<String>,
    base_url: String,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let captured_at = ctx
        .store()
        .get()
        .and_then(|credentials| credentials.captured_at())
        .map(|at| at.to_rfc3339());

    let status = match ctx.client.auth().resolve() {
        Some(identity) => AuthStatusResponse {
            authenticated: identity.token.is_some(),
            token_source: Some(identity.source.to_string()),
            user_id: identity.user_id,
            email: identity.email,
            captured_at,
            base_url: ctx.client.base_url().to_string(),
            note: None,
        },
        None => AuthStatusResponse {
            authenticated: false,
            token_source: None,
            user_id: None,
            email: None,
            captured_at: None,
            base_url: ctx.client.base_url().to_string(),
            note: Some("no session credentials and no fallback identity configured".into()),
        },
    };

    output(&status, flags.format)
}
