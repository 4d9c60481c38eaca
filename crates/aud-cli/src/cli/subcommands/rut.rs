use std::path::PathBuf;

use aud_core::entities::ProcessingState;
use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum RutCommands {
    /// Extract RUT documents in one batch request.
    Extract(RutExtractArgs),
    /// List stored RUT records.
    List(RutListArgs),
    /// Show one stored record.
    Show(RutShowArgs),
    /// Move a record to another processing state.
    SetState(RutSetStateArgs),
    /// Map stored records onto rows of the "Clientes" import sheet.
    Export(RutExportArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RutExtractArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Associate every extracted RUT with this client/provider.
    #[arg(long)]
    pub client_provider_id: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct RutListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Defaults to `general.default_page_size`.
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct RutShowArgs {
    pub nit: String,
}

#[derive(Clone, Debug, Args)]
pub struct RutSetStateArgs {
    pub nit: String,
    /// EXTRAIDO, LISTO or PROCESADO.
    pub state: ProcessingState,
}

#[derive(Clone, Debug, Args)]
pub struct RutExportArgs {
    /// Export every record instead of only those in LISTO.
    #[arg(long)]
    pub all: bool,
}
