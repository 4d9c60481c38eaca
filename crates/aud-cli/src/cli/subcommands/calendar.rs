use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum CalendarCommands {
    /// Deadlines for large taxpayers.
    LargeTaxpayers(CalendarArgs),
    /// Deadlines for legal entities.
    LegalEntities(CalendarArgs),
}

/// Without `--year` and `--digit` the complete calendar is returned.
#[derive(Clone, Debug, Args)]
pub struct CalendarArgs {
    /// Taxable year.
    #[arg(long, requires = "digit")]
    pub year: Option<i32>,
    /// Last digit of the NIT (0-9).
    #[arg(long, requires = "year")]
    pub digit: Option<u8>,
}
