use std::slice;

use aud_core::entities::{DeclarationExtraction, TaxpayerInfo};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DeclarationArgs;
use crate::commands::shared::load_files;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct DeclarationResponse {
    taxpayer: Option<TaxpayerInfo>,
    extraction: DeclarationExtraction,
}

/// Handle `auditor declaration <file>`.
pub async fn handle(
    args: &DeclarationArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut files = load_files(slice::from_ref(&args.file)).await?;
    let file = files.remove(0);

    let progress = Progress::upload(&file.file_name, flags.quiet);
    let result = ctx
        .client
        .extract_declaration(&file, Some(progress.sink()))
        .await;
    progress.finish();
    let extraction = result?;

    output(
        &DeclarationResponse {
            taxpayer: extraction.taxpayer_info(),
            extraction,
        },
        flags.format,
    )
}
