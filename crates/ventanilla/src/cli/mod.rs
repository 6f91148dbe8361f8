//! Command-line interface for ventanilla.
//!
//! This module provides the CLI structure and argument types for the
//! `ventanilla` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, KindArg, ListCommand, ServeCommand, SubmitCommand};

/// ventanilla - Municipal service-window intake
///
/// Run the intake API, submit claims and service requests from the
/// terminal, and review the merged listing with filters.
#[derive(Debug, Parser)]
#[command(name = "ventanilla")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the intake HTTP API
    Serve(ServeCommand),

    /// Submit a new claim or service request
    Submit(SubmitCommand),

    /// List and filter submitted records
    List(ListCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "ventanilla");
    }

    #[test]
    fn test_verbosity_quiet() {
        let args = vec!["ventanilla", "-q", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(vec!["ventanilla", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);

        let cli = Cli::try_parse_from(vec!["ventanilla", "-v", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);

        let cli = Cli::try_parse_from(vec!["ventanilla", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_serve() {
        let args = vec!["ventanilla", "serve", "--port", "8080"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Serve(cmd) => assert_eq!(cmd.port, Some(8080)),
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_submit() {
        let args = vec![
            "ventanilla",
            "submit",
            "reclamo",
            "--cuenta",
            "1234567/001",
            "--empleado",
            "jperez",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Submit(_)));
    }

    #[test]
    fn test_parse_list_with_filters() {
        let args = vec![
            "ventanilla",
            "list",
            "--tipo",
            "reclamo",
            "--desde",
            "2024-01-01",
            "--hasta",
            "2024-01-31",
            "--buscar",
            "bache",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["ventanilla", "-c", "/custom/config.toml", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_show() {
        let args = vec!["ventanilla", "config", "show", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }
}
