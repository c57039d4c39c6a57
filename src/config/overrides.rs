//! Override configuration derived from process arguments and environment.
//!
//! Arguments of the form `--<section>-<key>[=<value>]` and environment
//! variables named `<section>-<key>` become entries at `section.key`.
//! A missing or empty value is stored as boolean `true`. Arguments are
//! applied first, so an environment variable wins over an argument naming the
//! same key.

use crate::path::{self, ConfigPath};
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

fn arg_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^--([^-]+)-([^=]+)=?(.*)$").expect("valid regex"))
}

fn env_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([^-]+)-(.+)$").expect("valid regex"))
}

/// Where the override mapping is read from.
#[derive(Debug, Clone, Default)]
pub enum OverrideSource {
    /// The current process arguments and environment.
    #[default]
    Process,
    /// Explicit argument and environment lists.
    Explicit {
        args: Vec<String>,
        env: Vec<(String, String)>,
    },
    /// No overrides at all.
    Disabled,
}

impl OverrideSource {
    /// Build an explicit source from argument and environment lists.
    pub fn explicit<A, E, K, V>(args: A, env: E) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        E: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        OverrideSource::Explicit {
            args: args.into_iter().map(Into::into).collect(),
            env: env.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Derive the override mapping from this source.
    pub fn derive(&self) -> Value {
        match self {
            OverrideSource::Process => derive_overrides(process_args(), process_env()),
            OverrideSource::Explicit { args, env } => {
                derive_overrides(args.iter().cloned(), env.iter().cloned())
            }
            OverrideSource::Disabled => Value::Object(Map::new()),
        }
    }
}

/// Process arguments after the program name. Non-UTF-8 arguments cannot name
/// a config key and are skipped.
pub fn process_args() -> impl Iterator<Item = String> {
    std::env::args_os()
        .skip(1)
        .filter_map(|arg| arg.into_string().ok())
}

/// Process environment, skipping variables whose name or value is not UTF-8.
pub fn process_env() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
}

/// Parse one argument. Returns the `[section, key]` path and its value.
pub fn parse_arg(arg: &str) -> Option<(ConfigPath, Value)> {
    let caps = arg_pattern().captures(arg)?;
    let path = ConfigPath::from_segments([&caps[1], &caps[2]]);
    Some((path, flag_value(&caps[3])))
}

/// Parse one environment variable name and value.
pub fn parse_env(name: &str, value: &str) -> Option<(ConfigPath, Value)> {
    let caps = env_pattern().captures(name)?;
    let path = ConfigPath::from_segments([&caps[1], &caps[2]]);
    Some((path, flag_value(value)))
}

fn flag_value(raw: &str) -> Value {
    if raw.is_empty() {
        Value::Bool(true)
    } else {
        Value::String(raw.to_string())
    }
}

/// Build the override mapping from arguments, then environment variables.
pub fn derive_overrides<A, E>(args: A, env: E) -> Value
where
    A: IntoIterator<Item = String>,
    E: IntoIterator<Item = (String, String)>,
{
    let mut overrides = Value::Object(Map::new());
    let mut count = 0usize;

    let from_args = args.into_iter().filter_map(|arg| {
        let parsed = parse_arg(&arg);
        if parsed.is_none() {
            trace!(arg = %arg, "Ignoring argument without section-key form");
        }
        parsed
    });
    let from_env = env
        .into_iter()
        .filter_map(|(name, value)| parse_env(&name, &value));

    for (path, value) in from_args.chain(from_env) {
        debug!(path = %path, "Config override");
        match path::set(&mut overrides, &path, value) {
            Ok(_) => count += 1,
            Err(e) => warn!(path = %path, error = %e, "Skipping config override"),
        }
    }

    debug!(count, "Derived config overrides");
    overrides
}
