use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use client_core::{http_source::DEFAULT_API_BASE_URL, HttpPhotoSourceConfig, DEFAULT_PAGE_SIZE};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub access_key: Option<String>,
    pub per_page: u32,
    pub request_timeout_secs: u64,
    pub preferences_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            access_key: None,
            per_page: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 15,
            preferences_path: PathBuf::from("./data/preferences.toml"),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn source_config(&self) -> HttpPhotoSourceConfig {
        HttpPhotoSourceConfig {
            base_url: self.api_base_url.clone(),
            access_key: self.access_key.clone(),
            request_timeout: self.request_timeout(),
        }
    }
}

/// Defaults, then the optional TOML file, then environment variables.
pub fn load_settings(config_path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let table = match toml::from_str::<toml::Table>(raw) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "config: ignoring unreadable settings file");
            return;
        }
    };
    let value = |key: &str| {
        table.get(key).and_then(|v| match v {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(i) => Some(i.to_string()),
            _ => None,
        })
    };

    if let Some(v) = value("api_base_url") {
        settings.api_base_url = v;
    }
    if let Some(v) = value("access_key") {
        settings.access_key = non_blank(v);
    }
    if let Some(v) = value("per_page") {
        set_positive(&mut settings.per_page, &v);
    }
    if let Some(v) = value("request_timeout_secs") {
        set_positive(&mut settings.request_timeout_secs, &v);
    }
    if let Some(v) = value("preferences_path") {
        settings.preferences_path = PathBuf::from(v);
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("UNSPLASH_ACCESS_KEY") {
        settings.access_key = non_blank(v);
    }
    if let Some(v) = lookup("APP__ACCESS_KEY") {
        settings.access_key = non_blank(v);
    }

    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__PER_PAGE") {
        set_positive(&mut settings.per_page, &v);
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        set_positive(&mut settings.request_timeout_secs, &v);
    }

    if let Some(v) = lookup("APP__PREFERENCES_PATH") {
        settings.preferences_path = PathBuf::from(v);
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn set_positive<T>(target: &mut T, raw: &str)
where
    T: std::str::FromStr + PartialOrd + Default,
{
    if let Ok(parsed) = raw.trim().parse::<T>() {
        if parsed > T::default() {
            *target = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
