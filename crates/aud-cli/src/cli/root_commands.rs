use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, CalendarCommands, RutCommands, ThirdPartyCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Session credentials.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Accept credentials from a host process as JSON lines on stdin.
    Relay,
    /// Extract a tax declaration form.
    Declaration(DeclarationArgs),
    /// RUT extraction and stored records.
    Rut {
        #[command(subcommand)]
        action: RutCommands,
    },
    /// Extract electronic invoices, one request per file.
    Invoice(InvoiceArgs),
    /// Tax calendar deadlines.
    Calendar {
        #[command(subcommand)]
        action: CalendarCommands,
    },
    /// Clients and providers.
    #[command(alias = "terceros")]
    ThirdParty {
        #[command(subcommand)]
        action: ThirdPartyCommands,
    },
    /// List accounting clients.
    AccountingClients,
}

#[derive(Clone, Debug, Args)]
pub struct DeclarationArgs {
    /// Declaration PDF.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct InvoiceArgs {
    /// Invoice files (PDF, XML or ZIP).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
