use aud_client::ApiClient;
use aud_core::entities::RutRecord;
use aud_core::export::{CLIENT_SHEET_HEADERS, ClientRow, client_rows, ready_for_export};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{RutCommands, RutExportArgs, RutExtractArgs, RutListArgs};
use crate::commands::shared::{load_files, upload_label};
use crate::context::AppContext;
use crate::output::{output, output_sheet};
use crate::progress::Progress;

const EXPORT_PAGE_SIZE: u32 = 100;

/// Handle `auditor rut <subcommand>`.
pub async fn handle(
    action: &RutCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RutCommands::Extract(args) => extract(args, ctx, flags).await,
        RutCommands::List(args) => list(args, ctx, flags).await,
        RutCommands::Show(args) => {
            let record = ctx.client.rut_details(&args.nit).await?;
            output(&record, flags.format)
        }
        RutCommands::SetState(args) => {
            let update = ctx.client.update_rut_state(&args.nit, args.state).await?;
            output(&update, flags.format)
        }
        RutCommands::Export(args) => export(args, ctx, flags).await,
    }
}

async fn extract(args: &RutExtractArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let files = load_files(&args.files).await?;
    let progress = Progress::upload(&upload_label(&files), flags.quiet);
    let sink = Some(progress.sink());

    match args.client_provider_id {
        Some(id) => {
            let result = ctx.client.extract_ruts_for_client(&files, id, sink).await;
            progress.finish();
            output(&result?, flags.format)
        }
        None => {
            let result = ctx.client.extract_ruts(&files, sink).await;
            progress.finish();
            output(&result?, flags.format)
        }
    }
}

async fn list(args: &RutListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page_size = args
        .page_size
        .unwrap_or(ctx.config.general.default_page_size);
    let page = ctx.client.list_ruts(args.page, page_size).await?;
    output(&page, flags.format)
}

async fn export(args: &RutExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = all_records(&ctx.client).await?;
    let rows = if args.all {
        client_rows(&records)
    } else {
        ready_for_export(&records)?
    };
    tracing::info!(rows = rows.len(), records = records.len(), "mapped records to sheet rows");
    output_sheet(&rows, &CLIENT_SHEET_HEADERS, &sheet_cells(&rows), flags.format)
}

fn sheet_cells(rows: &[ClientRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.cells().iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

async fn all_records(client: &ApiClient) -> anyhow::Result<Vec<RutRecord>> {
    let mut records = Vec::new();
    let mut page = 1;
    loop {
        let response = client.list_ruts(page, EXPORT_PAGE_SIZE).await?;
        records.extend(response.ruts);
        if page >= response.total_pages {
            return Ok(records);
        }
        page += 1;
    }
}
