//! Path-addressed access into untyped JSON mappings.
//!
//! A [`ConfigPath`] is either a dotted string (`"db.host"`) or an explicit
//! list of segments (`["db", "host"]`). Both forms resolve identically; a
//! segment taken from an explicit list may itself contain `.`.

use crate::error::PathError;
use serde_json::{Map, Value};
use std::fmt;

/// Ordered key segments addressing a nested location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    /// Path addressing the container itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a dotted string into segments. The empty string is the root path.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    /// Build a path from explicit segments without splitting them.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment, returning the extended path.
    pub fn join(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for ConfigPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for ConfigPath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&String> for ConfigPath {
    fn from(s: &String) -> Self {
        Self::parse(s)
    }
}

impl From<&[&str]> for ConfigPath {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for ConfigPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from_segments(segments)
    }
}

impl From<Vec<String>> for ConfigPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&ConfigPath> for ConfigPath {
    fn from(path: &ConfigPath) -> Self {
        path.clone()
    }
}

/// Step one segment into `value`. Arrays accept numeric segments.
fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Resolve `path` inside `container`.
///
/// Returns `None` when any intermediate is absent or `null`, or when the final
/// key is absent. A present final value is returned even when it is `false`,
/// `0`, `""` or an explicit `null`. The root path returns the container unless
/// it is `null`.
pub fn lookup<'a>(container: &'a Value, path: impl Into<ConfigPath>) -> Option<&'a Value> {
    let path = path.into();
    let Some((last, intermediates)) = path.segments.split_last() else {
        return (!container.is_null()).then_some(container);
    };

    let mut current = container;
    for segment in intermediates {
        match step(current, segment) {
            Some(next) if !next.is_null() => current = next,
            _ => return None,
        }
    }
    step(current, last)
}

/// Resolve `path` inside `container`, falling back to `default` when nothing
/// is reachable there.
pub fn get(container: &Value, path: impl Into<ConfigPath>, default: Value) -> Value {
    lookup(container, path).cloned().unwrap_or(default)
}

/// Assign `value` at `path`, creating empty objects for absent or `null`
/// intermediates.
///
/// A `null` container is replaced by an empty object first. Walking through a
/// scalar or an array fails with [`PathError::NotAMapping`] and leaves the
/// container untouched.
pub fn set(
    container: &mut Value,
    path: impl Into<ConfigPath>,
    value: Value,
) -> Result<&mut Value, PathError> {
    let path = path.into();
    let Some((last, intermediates)) = path.segments.split_last() else {
        return Err(PathError::EmptyPath);
    };

    // Validate first so a failure cannot leave half-created objects behind.
    let mut probe = Some(&*container);
    for (depth, segment) in intermediates.iter().enumerate() {
        match probe {
            None | Some(Value::Null) => break,
            Some(Value::Object(map)) => probe = map.get(segment),
            Some(_) => return Err(not_a_mapping(&path, depth)),
        }
    }
    if let Some(found) = probe
        && !found.is_null()
        && !found.is_object()
    {
        return Err(not_a_mapping(&path, intermediates.len()));
    }

    if container.is_null() {
        *container = Value::Object(Map::new());
    }
    let mut current = &mut *container;
    for (depth, segment) in intermediates.iter().enumerate() {
        let Some(map) = current.as_object_mut() else {
            return Err(not_a_mapping(&path, depth));
        };
        let entry = map
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if entry.is_null() {
            *entry = Value::Object(Map::new());
        }
        current = entry;
    }
    let Some(map) = current.as_object_mut() else {
        return Err(not_a_mapping(&path, intermediates.len()));
    };
    map.insert(last.clone(), value);
    Ok(container)
}

fn not_a_mapping(path: &ConfigPath, depth: usize) -> PathError {
    PathError::NotAMapping {
        path: path.segments[..depth].join("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_and_segment_paths_match() {
        let obj = json!({"key1": {"key1-1": "val-1"}});
        assert_eq!(get(&obj, "key1.key1-1", json!(null)), json!("val-1"));
        assert_eq!(get(&obj, ["key1", "key1-1"], json!(null)), json!("val-1"));
        assert_eq!(get(&obj, "key1.key1-2", json!("def")), json!("def"));
        assert_eq!(get(&obj, ["key2", "key1-1"], json!("def")), json!("def"));
    }

    #[test]
    fn test_falsy_values_are_present() {
        let obj = json!({"a": {"f": false, "z": 0, "e": "", "n": null}});
        assert_eq!(get(&obj, "a.f", json!("d")), json!(false));
        assert_eq!(get(&obj, "a.z", json!("d")), json!(0));
        assert_eq!(get(&obj, "a.e", json!("d")), json!(""));
        assert_eq!(get(&obj, "a.n", json!("d")), json!(null));
    }

    #[test]
    fn test_null_intermediate_returns_default() {
        let obj = json!({"a": null});
        assert_eq!(get(&obj, "a.b", json!(7)), json!(7));
        assert_eq!(get(&json!("scalar"), "a.b", json!(7)), json!(7));
    }

    #[test]
    fn test_root_path_returns_container() {
        let obj = json!({"a": 1});
        assert_eq!(get(&obj, "", json!(null)), obj);
        assert_eq!(get(&json!(null), "", json!("d")), json!("d"));
        assert!(lookup(&obj, ConfigPath::root()).is_some());
    }

    #[test]
    fn test_array_index_segments() {
        let obj = json!({"hosts": ["a", "b"]});
        assert_eq!(get(&obj, "hosts.1", json!(null)), json!("b"));
        assert_eq!(get(&obj, "hosts.5", json!("none")), json!("none"));
        assert_eq!(get(&obj, "hosts.x", json!("none")), json!("none"));
    }

    #[test]
    fn test_segment_may_contain_dot() {
        let obj = json!({"a": {"b.c": 1}});
        assert_eq!(get(&obj, ["a", "b.c"], json!(null)), json!(1));
        assert_eq!(get(&obj, "a.b.c", json!(null)), json!(null));
    }

    #[test]
    fn test_set_creates_intermediates() {
        let mut obj = json!({});
        set(&mut obj, "key1.key1-1", json!("val-1")).unwrap();
        assert_eq!(obj, json!({"key1": {"key1-1": "val-1"}}));

        set(&mut obj, "key1.key1-2", json!(2)).unwrap();
        assert_eq!(obj, json!({"key1": {"key1-1": "val-1", "key1-2": 2}}));
    }

    #[test]
    fn test_set_replaces_null_container_and_intermediate() {
        let mut obj = Value::Null;
        set(&mut obj, "a.b", json!(1)).unwrap();
        assert_eq!(obj, json!({"a": {"b": 1}}));

        let mut obj = json!({"a": null});
        set(&mut obj, "a.b", json!(1)).unwrap();
        assert_eq!(obj, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_set_through_scalar_fails_without_mutation() {
        let mut obj = json!({"a": {"b": 5}});
        let err = set(&mut obj, "a.b.c.d", json!(1)).unwrap_err();
        assert_eq!(
            err,
            PathError::NotAMapping {
                path: "a.b".to_string()
            }
        );
        assert_eq!(obj, json!({"a": {"b": 5}}));

        let mut arr = json!({"list": [1, 2]});
        assert!(set(&mut arr, "list.0", json!(3)).is_err());

        let mut scalar = json!(3);
        let err = set(&mut scalar, "a", json!(1)).unwrap_err();
        assert_eq!(err, PathError::NotAMapping { path: String::new() });
    }

    #[test]
    fn test_set_empty_path_fails() {
        let mut obj = json!({});
        assert_eq!(set(&mut obj, "", json!(1)), Err(PathError::EmptyPath));
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let cases = [
            ("a", json!(1)),
            ("a.b", json!(false)),
            ("x.y.z", json!({"deep": [1, 2]})),
            ("s", json!("")),
        ];
        for (path, value) in cases {
            let mut obj = json!({"other": true});
            set(&mut obj, path, value.clone()).unwrap();
            assert_eq!(get(&obj, path, json!("missing")), value, "path {path}");
        }
    }

    #[test]
    fn test_path_display_and_join() {
        let path = ConfigPath::parse("db").join("host");
        assert_eq!(path.to_string(), "db.host");
        assert_eq!(path, ConfigPath::from(["db", "host"]));
        assert!(ConfigPath::parse("").is_root());
    }
}
