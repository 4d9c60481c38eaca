use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `auditor` binary.
#[derive(Debug, Parser)]
#[command(
    name = "auditor",
    version,
    about = "Auditor - tax document extraction and credential relay"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (no progress bars, errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use aud_core::entities::{EntityKind, ProcessingState};
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::subcommands::{AuthCommands, CalendarCommands, RutCommands, ThirdPartyCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["auditor", "auth", "status", "--format", "table", "-q"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn login_requires_token_and_user_id() {
        assert!(Cli::try_parse_from(["auditor", "auth", "login", "--token", "t"]).is_err());

        let cli = Cli::try_parse_from([
            "auditor", "auth", "login", "--token", "t", "--user-id", "u", "--email", "a@b.co",
        ])
        .expect("cli should parse");
        let Commands::Auth {
            action: AuthCommands::Login(args),
        } = cli.command
        else {
            panic!("expected auth login");
        };
        assert_eq!(args.token, "t");
        assert_eq!(args.user_id, "u");
        assert_eq!(args.email.as_deref(), Some("a@b.co"));
    }

    #[test]
    fn rut_extract_takes_many_files_and_optional_client() {
        let cli = Cli::try_parse_from([
            "auditor",
            "rut",
            "extract",
            "a.pdf",
            "b.pdf",
            "--client-provider-id",
            "7",
        ])
        .expect("cli should parse");
        let Commands::Rut {
            action: RutCommands::Extract(args),
        } = cli.command
        else {
            panic!("expected rut extract");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.client_provider_id, Some(7));
    }

    #[test]
    fn rut_extract_needs_at_least_one_file() {
        assert!(Cli::try_parse_from(["auditor", "rut", "extract"]).is_err());
    }

    #[rstest]
    #[case("LISTO", ProcessingState::Ready)]
    #[case("procesado", ProcessingState::Processed)]
    #[case("extracted", ProcessingState::Extracted)]
    fn set_state_parses_processing_states(#[case] raw: &str, #[case] expected: ProcessingState) {
        let cli = Cli::try_parse_from(["auditor", "rut", "set-state", "900123456", raw])
            .expect("cli should parse");
        let Commands::Rut {
            action: RutCommands::SetState(args),
        } = cli.command
        else {
            panic!("expected rut set-state");
        };
        assert_eq!(args.nit, "900123456");
        assert_eq!(args.state, expected);
    }

    #[test]
    fn set_state_rejects_unknown_state() {
        assert!(Cli::try_parse_from(["auditor", "rut", "set-state", "1", "ARCHIVED"]).is_err());
    }

    #[test]
    fn calendar_filter_flags_come_in_pairs() {
        assert!(
            Cli::try_parse_from(["auditor", "calendar", "legal-entities", "--year", "2025"])
                .is_err()
        );

        let cli = Cli::try_parse_from([
            "auditor",
            "calendar",
            "large-taxpayers",
            "--year",
            "2025",
            "--digit",
            "3",
        ])
        .expect("cli should parse");
        let Commands::Calendar {
            action: CalendarCommands::LargeTaxpayers(args),
        } = cli.command
        else {
            panic!("expected calendar large-taxpayers");
        };
        assert_eq!(args.year, Some(2025));
        assert_eq!(args.digit, Some(3));
    }

    #[rstest]
    #[case("third-party")]
    #[case("terceros")]
    fn third_party_list_accepts_alias(#[case] name: &str) {
        let cli = Cli::try_parse_from(["auditor", name, "list", "--kind", "proveedor"])
            .expect("cli should parse");
        let Commands::ThirdParty {
            action: ThirdPartyCommands::List(args),
        } = cli.command
        else {
            panic!("expected third-party list");
        };
        assert_eq!(args.kind, EntityKind::Provider);
    }

    #[test]
    fn relay_takes_no_arguments() {
        let cli = Cli::try_parse_from(["auditor", "relay"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Relay));
    }
}
