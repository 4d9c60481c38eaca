use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditor accounting-clients`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page = ctx.client.list_accounting_clients().await?;
    output(&page, flags.format)
}
