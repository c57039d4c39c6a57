//! web-shared CLI
//!
//! Resolves layered configuration the same way an application using the
//! library would, and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::fs::OpenOptions;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use web_shared::cli::{Cli, Command};
use web_shared::coerce::{self, CoerceOptions};
use web_shared::config::{CONFIG_PATH_ENV, OverrideSource, Resolver, process_env};
use web_shared::path::ConfigPath;

/// `RUST_LOG` when set, otherwise everything at `level` and above.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {}
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter(level))
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter(level))
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)
                .with_context(|| format!("opening log file {}", filename))?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter(level))
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

/// `--default` accepts JSON; anything that does not parse is taken as a string.
fn parse_default(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Null,
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

fn print_value(value: &Value) -> Result<()> {
    match value {
        Value::String(s) => println!("{}", s),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let overrides = match &cli.command {
        Command::Get(args) => &args.overrides,
        Command::Dump(args) => args,
    };
    let mut resolver = Resolver::new(OverrideSource::explicit(
        overrides.args.iter().cloned(),
        process_env(),
    ));

    let config_file = cli
        .config
        .clone()
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());
    match config_file {
        Some(file) => {
            let at = cli.at.as_deref().map(ConfigPath::parse);
            resolver.init_from_file(&file, at)?;
        }
        None => {
            debug!("No config file given, using overrides only");
            resolver.init(Value::Object(Default::default()));
        }
    }

    match &cli.command {
        Command::Get(args) => {
            let value = resolver.get(args.path.as_str(), parse_default(args.default.as_deref()));
            let value = match args.kind {
                Some(kind) => coerce::coerce(&value, kind, &CoerceOptions::default()),
                None => value,
            };
            print_value(&value)?;
        }
        Command::Dump(_) => {
            println!("{}", serde_json::to_string_pretty(&resolver.effective())?);
        }
    }
    Ok(())
}
