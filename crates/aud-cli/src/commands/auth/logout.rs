use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let had_credentials = ctx.store().has_credentials();
    ctx.store().clear();
    output(
        &AuthLogoutResponse {
            cleared: had_credentials,
        },
        flags.format,
    )
}
