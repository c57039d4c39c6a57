//! Shared web application utilities.
//!
//! The core is a layered configuration [`config::Resolver`]: a base tree from
//! files or in-memory data, overridden per key by `--section-key=value`
//! arguments and `section-key=value` environment variables. Around it sit the
//! helpers web handlers reach for: path access into JSON trees, type
//! coercion, cookies, request variables, text, validation, dates and ids.

pub mod array;
pub mod cli;
pub mod coerce;
pub mod config;
pub mod cookies;
pub mod date;
pub mod error;
pub mod ids;
pub mod path;
pub mod text;
pub mod validate;
pub mod vars;
