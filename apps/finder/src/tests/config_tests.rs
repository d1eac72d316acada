use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("finder_{label}_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    root
}

#[test]
fn defaults_match_directory_contract() {
    let settings = Settings::default();
    assert_eq!(settings.api_url, "https://api.github.com");
    assert_eq!(settings.debounce_ms, 300);
    assert_eq!(settings.request_timeout_secs, 10);
    assert_eq!(settings.page_size, 30);
    assert_eq!(settings.result_cap, 1000);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
            api_url = "https://ghe.example/api/v3"
            debounce_ms = 150
            result_cap = 500
        "#,
    )
    .expect("parse");

    assert_eq!(settings.api_url, "https://ghe.example/api/v3");
    assert_eq!(settings.debounce_ms, 150);
    assert_eq!(settings.result_cap, 500);
    assert_eq!(settings.page_size, 30);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "debounce = 10").is_err());
}

#[test]
fn env_overrides_win_and_bad_numbers_are_ignored() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("FINDER_API_URL", "http://legacy.example"),
        ("APP__API_URL", "http://127.0.0.1:9000"),
        ("APP__DEBOUNCE_MS", "50"),
        ("APP__PAGE_SIZE", "not-a-number"),
    ]);
    let mut settings = Settings::default();
    apply_env(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.api_url, "http://127.0.0.1:9000");
    assert_eq!(settings.debounce_ms, 50);
    assert_eq!(settings.page_size, 30);
}

#[test]
fn explicit_config_file_is_loaded() {
    let root = temp_root("config");
    let path = root.join("custom.toml");
    fs::write(&path, "request_timeout_secs = 3\npage_size = 10\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.page_size, 10);
    assert_eq!(
        settings.client_settings().request_timeout,
        Duration::from_secs(3)
    );
    assert_eq!(settings.controller_settings().page_size, 10);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let root = temp_root("missing");
    let err = load_settings(Some(&root.join("absent.toml"))).expect_err("must fail");
    assert!(err.to_string().contains("failed to read config file"));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn page_size_outside_directory_limit_is_rejected() {
    let mut settings = Settings::default();
    settings.validate().expect("defaults are valid");

    settings.page_size = 100;
    settings.validate().expect("upper bound is valid");

    settings.page_size = 200;
    let err = settings.validate().expect_err("must fail");
    assert!(err.to_string().contains("page_size must be between 1 and 100"));

    settings.page_size = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn oversized_page_size_in_config_file_fails_to_load() {
    let root = temp_root("page_size");
    let path = root.join("custom.toml");
    fs::write(&path, "page_size = 200\n").expect("write config");

    let err = load_settings(Some(&path)).expect_err("must fail");
    assert!(err.to_string().contains("page_size"));

    fs::remove_dir_all(root).expect("cleanup");
}
