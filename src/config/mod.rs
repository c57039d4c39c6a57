//! Layered configuration.
//!
//! A [`Resolver`] holds a base tree built from in-memory data or config files,
//! layered under overrides parsed from process arguments and environment
//! variables:
//!
//! - `--<section>-<key>[=<value>]` on the command line
//! - `<section>-<key>=<value>` in the environment (applied after arguments)
//!
//! An override with no value becomes `true`.
//!
//! ## Environment Variables
//! - `WEB_SHARED_CONFIG_PATH` - Config file used by the CLI when `--config` is absent

mod loader;
mod merge;
mod overrides;
mod resolver;

pub use loader::{CONFIG_PATH_ENV, ConfigFormat, load_file, load_section, parse_str};
pub use merge::{deep_merge, deep_merge_all, merge_into};
pub use overrides::{
    OverrideSource, derive_overrides, parse_arg, parse_env, process_args, process_env,
};
pub use resolver::Resolver;
