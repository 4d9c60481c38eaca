use crate::cli::GlobalFlags;
use crate::cli::root_commands::InvoiceArgs;
use crate::commands::shared::{load_files, upload_label};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `auditor invoice <files>...`.
pub async fn handle(args: &InvoiceArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let files = load_files(&args.files).await?;

    let progress = Progress::upload(&upload_label(&files), flags.quiet);
    let result = ctx
        .client
        .extract_invoices(&files, Some(progress.sink()))
        .await;
    progress.finish();
    let report = result?;

    if report.failed_extractions > 0 {
        tracing::warn!(
            failed = report.failed_extractions,
            total = report.total_files,
            "some invoices could not be extracted"
        );
    }
    output(&report, flags.format)
}
