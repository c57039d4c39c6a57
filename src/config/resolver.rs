//! Layered configuration resolver.
//!
//! Holds a base tree (in-memory data or config files) and an override tree
//! derived from process arguments and environment variables. Reads merge the
//! two per key, so an override such as `--db-host=localhost` replaces only
//! `db.host` and keeps the rest of `db` from the base.

use super::loader;
use super::merge::{deep_merge, merge_into};
use super::overrides::OverrideSource;
use crate::coerce::{self, CoerceOptions, Coercion};
use crate::error::{ConfigError, ConfigResult};
use crate::path::{self, ConfigPath};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Base configuration layered under process-derived overrides.
///
/// Build one at startup, call [`Resolver::init`] or
/// [`Resolver::init_from_file`], then share it (by reference or `Arc`) with
/// the code that reads configuration.
#[derive(Debug)]
pub struct Resolver {
    /// Static configuration loaded at init.
    base: Value,
    /// Where the override tree comes from.
    source: OverrideSource,
    /// Override tree, derived on first use and never recomputed.
    overrides: OnceLock<Value>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::from_process()
    }
}

impl Resolver {
    /// Resolver whose overrides come from `source`.
    pub fn new(source: OverrideSource) -> Self {
        Self {
            base: Value::Object(Map::new()),
            source,
            overrides: OnceLock::new(),
        }
    }

    /// Resolver overridden by the current process arguments and environment.
    pub fn from_process() -> Self {
        Self::new(OverrideSource::Process)
    }

    /// Resolver with no overrides.
    pub fn without_overrides() -> Self {
        Self::new(OverrideSource::Disabled)
    }

    /// Deep-merge `data` into the base tree. Incoming values win.
    ///
    /// Derives the override tree if that has not happened yet.
    pub fn init(&mut self, data: Value) -> &mut Self {
        merge_into(&mut self.base, data);
        self.overrides();
        self
    }

    /// Load a YAML or JSON file, optionally select the sub-tree at `at`, and
    /// merge it into the base tree.
    pub fn init_from_file(
        &mut self,
        file: impl AsRef<Path>,
        at: Option<ConfigPath>,
    ) -> ConfigResult<&mut Self> {
        let data = loader::load_section(file.as_ref(), at.as_ref())?;
        Ok(self.init(data))
    }

    /// The base tree.
    pub fn base(&self) -> &Value {
        &self.base
    }

    /// The override tree, derived on first access.
    pub fn overrides(&self) -> &Value {
        self.overrides.get_or_init(|| {
            debug!(source = ?self.source, "Deriving config overrides");
            self.source.derive()
        })
    }

    /// Merged value at `path`, or `None` when neither layer has one.
    pub fn lookup(&self, path: impl Into<ConfigPath>) -> Option<Value> {
        let path = path.into();
        let base = path::lookup(&self.base, &path).cloned();
        match (base, self.override_at(&path)) {
            (base, None) => base,
            (None, Some(over)) => Some(over.clone()),
            (Some(base), Some(over)) => Some(deep_merge(base, over.clone())),
        }
    }

    /// Merged value at `path`, with `default` standing in for a missing base
    /// value.
    pub fn get(&self, path: impl Into<ConfigPath>, default: Value) -> Value {
        let path = path.into();
        let base = path::get(&self.base, &path, default);
        match self.override_at(&path) {
            None => base,
            Some(over) => deep_merge(base, over.clone()),
        }
    }

    /// [`Resolver::get`] followed by a coercion.
    pub fn get_t(&self, path: impl Into<ConfigPath>, kind: Coercion, default: Value) -> Value {
        coerce::coerce(&self.get(path, default), kind, &CoerceOptions::default())
    }

    /// Integer value at `path`.
    pub fn get_int(&self, path: impl Into<ConfigPath>, default: i64) -> i64 {
        coerce::to_int(&self.get(path, Value::from(default)))
    }

    pub fn get_float(&self, path: impl Into<ConfigPath>, default: f64) -> f64 {
        coerce::to_float(&self.get(path, Value::from(default)))
    }

    pub fn get_bool(&self, path: impl Into<ConfigPath>, default: bool) -> bool {
        coerce::to_bool(&self.get(path, Value::Bool(default)))
    }

    pub fn get_string(&self, path: impl Into<ConfigPath>, default: &str) -> String {
        coerce::to_text(&self.get(path, Value::from(default)), &CoerceOptions::default())
    }

    /// Deserialize the merged value at `path` into `T`.
    ///
    /// A missing value is decoded from `null`, so `Option` and
    /// `#[serde(default)]` fields behave as expected.
    pub fn get_as<T: DeserializeOwned>(&self, path: impl Into<ConfigPath>) -> ConfigResult<T> {
        let path = path.into();
        let value = self.lookup(&path).unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| ConfigError::decode(&path.to_string(), e))
    }

    /// The whole merged tree.
    pub fn effective(&self) -> Value {
        self.get(ConfigPath::root(), Value::Object(Map::new()))
    }

    /// Override value at `path`; `null` counts as absent.
    fn override_at(&self, path: &ConfigPath) -> Option<&Value> {
        path::lookup(self.overrides(), path).filter(|v| !v.is_null())
    }
}
