use aud_core::entities::NewClientProvider;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ThirdPartyCommands, ThirdPartyCreateArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `auditor third-party <subcommand>`.
pub async fn handle(
    action: &ThirdPartyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ThirdPartyCommands::List(args) => {
            let page = ctx.client.list_client_providers(args.kind).await?;
            output(&page, flags.format)
        }
        ThirdPartyCommands::Create(args) => {
            let created = ctx.client.create_client_provider(&new_client_provider(args)).await?;
            tracing::info!(id = created.id, name = %created.nombre_comercial, "client/provider created");
            output(&created, flags.format)
        }
        ThirdPartyCommands::Ruts(args) => {
            let ruts = ctx.client.client_provider_ruts(args.id).await?;
            output(&ruts, flags.format)
        }
    }
}

fn new_client_provider(args: &ThirdPartyCreateArgs) -> NewClientProvider {
    NewClientProvider {
        tipo_entidad: args.kind,
        nombre_comercial: args.name.trim().to_string(),
        categoria: args.category.clone(),
        sector_economico: args.sector.clone(),
        nivel_riesgo: args.risk,
        codigo_interno: args.code.clone(),
        notas: args.notes.clone(),
    }
}
