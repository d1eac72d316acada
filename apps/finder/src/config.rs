use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use search_core::{client::DEFAULT_API_URL, ClientSettings, ControllerSettings};
use serde::Deserialize;
use shared::domain::{DEFAULT_PAGE_SIZE, DEFAULT_RESULT_CAP};

pub const DEFAULT_CONFIG_FILE: &str = "finder.toml";
/// Largest `per_page` the directory honours.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub user_agent: String,
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub page_size: u32,
    pub result_cap: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            user_agent: concat!("finder/", env!("CARGO_PKG_VERSION")).into(),
            debounce_ms: 300,
            request_timeout_secs: 10,
            page_size: DEFAULT_PAGE_SIZE,
            result_cap: DEFAULT_RESULT_CAP,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    user_agent: Option<String>,
    debounce_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
    page_size: Option<u32>,
    result_cap: Option<u64>,
}

impl Settings {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_url: self.api_url.clone(),
            user_agent: self.user_agent.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            anyhow::bail!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            );
        }
        Ok(())
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            page_size: self.page_size,
            result_cap: self.result_cap,
        }
    }
}

/// Defaults, then the config file, then environment overrides.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    // An explicit path must exist; the default file is optional.
    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.user_agent {
        settings.user_agent = v;
    }
    if let Some(v) = file_cfg.debounce_ms {
        settings.debounce_ms = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = v;
    }
    if let Some(v) = file_cfg.result_cap {
        settings.result_cap = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("FINDER_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = lookup("APP__USER_AGENT") {
        settings.user_agent = v;
    }

    if let Some(v) = lookup("APP__DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
        settings.debounce_ms = v;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = lookup("APP__PAGE_SIZE").and_then(|v| v.parse().ok()) {
        settings.page_size = v;
    }
    if let Some(v) = lookup("APP__RESULT_CAP").and_then(|v| v.parse().ok()) {
        settings.result_cap = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
