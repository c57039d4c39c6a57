//! Request variable lookup across route params, query string and body.
//!
//! Handlers collect the outputs of axum's `Path<HashMap<..>>`,
//! `Query<HashMap<..>>` and `Json<Value>` (or `Form<HashMap<..>>`) extractors
//! into a [`RequestVars`] and read a name without caring where it arrived.

use crate::coerce::{self, CoerceOptions, Coercion};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestVars {
    pub params: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: Value,
}

fn to_map(pairs: HashMap<String, String>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect()
}

impl RequestVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = to_map(params);
        self
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = to_map(query);
        self
    }

    /// JSON body. Non-object bodies never match a name.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Form-encoded body.
    pub fn with_form(mut self, form: HashMap<String, String>) -> Self {
        self.body = Value::Object(to_map(form));
        self
    }

    /// First non-null value for `name` from params, then query, then body.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let present = |v: &&Value| !v.is_null();
        self.params
            .get(name)
            .filter(present)
            .or_else(|| self.query.get(name).filter(present))
            .or_else(|| self.body.get(name).filter(present))
    }

    /// [`RequestVars::get`] coerced to `kind`. A missing name coerces `null`.
    pub fn get_t(&self, name: &str, kind: Coercion) -> Value {
        let value = self.get(name).unwrap_or(&Value::Null);
        coerce::coerce(value, kind, &CoerceOptions::default())
    }
}
