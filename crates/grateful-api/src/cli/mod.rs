//! CLI command definitions for the `grateful` binary.

pub mod chat;
pub mod history;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// A small bot that asks what you're grateful for and remembers the answer.
#[derive(Parser)]
#[command(name = "grateful", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding config.toml and the database.
    #[arg(long, global = true, env = "GRATEFUL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Talk to the bot from this terminal.
    Chat {
        /// User id to chat as.
        #[arg(long, default_value = "local")]
        user: String,

        /// Display name used in the greeting.
        #[arg(long)]
        name: Option<String>,

        /// Keep entries in memory only; nothing is written to disk.
        #[arg(long)]
        ephemeral: bool,
    },

    /// Show a user's stored gratitude entries, newest first.
    History {
        /// User id whose entries to show.
        #[arg(long)]
        user: String,

        /// Maximum number of entries.
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Show configuration and storage statistics.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Map the verbosity flags to default tracing directives.
pub fn log_directives(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,grateful=debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chat() {
        let cli = Cli::try_parse_from(["grateful", "chat", "--user", "42", "--name", "Ana", "--ephemeral"])
            .unwrap();
        match cli.command {
            Commands::Chat { user, name, ephemeral } => {
                assert_eq!(user, "42");
                assert_eq!(name.as_deref(), Some("Ana"));
                assert!(ephemeral);
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn test_parse_history_with_global_flags() {
        let cli = Cli::try_parse_from(["grateful", "history", "--user", "7", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::History { user, limit } => {
                assert_eq!(user, "7");
                assert_eq!(limit, 10);
            }
            _ => panic!("expected history command"),
        }
    }

    #[test]
    fn test_log_directives() {
        assert_eq!(log_directives(0, true), "error");
        assert_eq!(log_directives(0, false), "warn");
        assert_eq!(log_directives(1, false), "info,grateful=debug");
        assert_eq!(log_directives(3, false), "trace");
    }
}
