use aud_core::entities::{EntityKind, RiskLevel};
use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum ThirdPartyCommands {
    /// List clients or providers.
    List(ThirdPartyListArgs),
    /// Register a client or provider.
    Create(ThirdPartyCreateArgs),
    /// RUTs associated with one client/provider.
    Ruts(ThirdPartyRutsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ThirdPartyListArgs {
    /// CLIENTE or PROVEEDOR.
    #[arg(long)]
    pub kind: EntityKind,
}

#[derive(Clone, Debug, Args)]
pub struct ThirdPartyCreateArgs {
    #[arg(long)]
    pub kind: EntityKind,
    /// Commercial name.
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub category: String,
    /// Economic sector.
    #[arg(long, default_value = "")]
    pub sector: String,
    /// ALTO, MEDIO or BAJO.
    #[arg(long, default_value = "BAJO")]
    pub risk: RiskLevel,
    /// Internal code.
    #[arg(long, default_value = "")]
    pub code: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(Clone, Debug, Args)]
pub struct ThirdPartyRutsArgs {
    pub id: i64,
}
