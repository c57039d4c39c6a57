//! End-to-end tests for layered configuration loaded from files.

use serde::Deserialize;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use web_shared::coerce::Coercion;
use web_shared::config::{OverrideSource, Resolver, deep_merge_all, load_file};
use web_shared::error::ErrorCode;
use web_shared::path::ConfigPath;

const APP_YAML: &str = r#"
production:
  db:
    host: db.prod.internal
    port: 5432
    pool: 20
  mail:
    from: noreply@example.com
development:
  db:
    host: localhost
    port: 5432
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let file = dir.path().join(name);
    fs::write(&file, content).unwrap();
    file
}

fn resolver(args: &[&str], env: &[(&str, &str)]) -> Resolver {
    Resolver::new(OverrideSource::explicit(
        args.iter().copied(),
        env.iter().copied(),
    ))
}

#[test]
fn test_file_section_with_arg_and_env_overrides() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "app.yaml", APP_YAML);

    let mut r = resolver(
        &["serve", "--db-host=10.0.0.5", "--mail-debug"],
        &[("db-pool", "5"), ("PATH", "/usr/bin")],
    );
    r.init_from_file(&file, Some(ConfigPath::parse("production")))
        .unwrap();

    assert_eq!(
        r.get("db", json!(null)),
        json!({"host": "10.0.0.5", "port": 5432, "pool": "5"})
    );
    assert_eq!(r.get_int("db.pool", 0), 5);
    assert!(r.get_bool("mail.debug", false));
    assert_eq!(r.get_string("mail.from", ""), "noreply@example.com");
    assert_eq!(r.lookup("development"), None);
}

#[test]
fn test_env_wins_over_args_for_same_key() {
    let mut r = resolver(&["--db-host=from-arg"], &[("db-host", "from-env")]);
    r.init(json!({"db": {"host": "base"}}));
    assert_eq!(r.get_string("db.host", ""), "from-env");
}

#[test]
fn test_layering_multiple_files() {
    let temp = TempDir::new().unwrap();
    let defaults = write(&temp, "defaults.json", r#"{"cache": {"ttl": 60, "enabled": true}}"#);
    let local = write(&temp, "local.yml", "cache:\n  ttl: 5\n");

    let mut r = Resolver::without_overrides();
    r.init_from_file(&defaults, None).unwrap();
    r.init_from_file(&local, None).unwrap();
    assert_eq!(r.effective(), json!({"cache": {"ttl": 5, "enabled": true}}));

    let merged = deep_merge_all([load_file(&defaults).unwrap(), load_file(&local).unwrap()]);
    assert_eq!(&merged, r.base());
}

#[test]
fn test_missing_file_and_section_errors() {
    let temp = TempDir::new().unwrap();
    let mut r = Resolver::without_overrides();

    let err = r
        .init_from_file(temp.path().join("nope.yaml"), None)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::FileNotFound);

    let file = write(&temp, "app.yaml", APP_YAML);
    let err = r
        .init_from_file(&file, Some(ConfigPath::parse("staging")))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::SectionNotFound);
    assert_eq!(r.base(), &json!({}));
}

#[derive(Debug, Deserialize)]
struct MailConfig {
    from: String,
    #[serde(default)]
    port: Option<u16>,
}

#[test]
fn test_typed_section_and_coercions() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "app.yaml", APP_YAML);

    let mut r = resolver(&["--mail-port=2525"], &[]);
    r.init_from_file(&file, Some(ConfigPath::parse("production")))
        .unwrap();

    let err = r.get_as::<MailConfig>("mail").unwrap_err();
    assert_eq!(err.code, ErrorCode::DecodeFailed);

    // Overrides arrive as strings; coerce before decoding into numeric fields.
    let port = r.get_t("mail.port", Coercion::Int, json!(25));
    assert_eq!(port, json!(2525));

    let mut plain = Resolver::without_overrides();
    plain
        .init_from_file(&file, Some(ConfigPath::parse("production")))
        .unwrap();
    let mail: MailConfig = plain.get_as("mail").unwrap();
    assert_eq!(mail.from, "noreply@example.com");
    assert_eq!(mail.port, None);
}
