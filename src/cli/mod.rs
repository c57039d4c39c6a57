//! CLI command definitions for web-shared
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::coerce::Coercion;
use clap::{Args, Parser, Subcommand};

/// Inspect layered configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Dotted path of the section to load from the config file
    #[arg(long, global = true)]
    pub at: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved value at a dotted path
    Get(GetArgs),

    /// Print the whole effective configuration
    Dump(OverrideArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted path, e.g. `db.host`
    pub path: String,

    /// Coerce the value before printing
    #[arg(long = "as", value_enum)]
    pub kind: Option<Coercion>,

    /// JSON value used when the path is missing (bare words are strings)
    #[arg(long)]
    pub default: Option<String>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Override arguments after `--`, e.g. `-- --db-host=localhost`.
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    #[arg(last = true, value_name = "OVERRIDES")]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_with_overrides() {
        let cli = Cli::try_parse_from([
            "web-shared",
            "-c",
            "app.yaml",
            "get",
            "db.port",
            "--as",
            "int",
            "--",
            "--db-port=6543",
        ])
        .unwrap();
        assert_eq!(cli.config.as_deref(), Some("app.yaml"));
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.path, "db.port");
        assert_eq!(args.kind, Some(Coercion::Int));
        assert_eq!(args.overrides.args, ["--db-port=6543"]);
    }

    #[test]
    fn test_parse_dump_defaults() {
        let cli = Cli::try_parse_from(["web-shared", "dump", "--at", "production"]).unwrap();
        assert_eq!(cli.at.as_deref(), Some("production"));
        assert_eq!(cli.log, "2");
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Command::Dump(OverrideArgs { ref args }) if args.is_empty()));
    }
}
