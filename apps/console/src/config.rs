use std::{collections::HashMap, fs, path::Path};

use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub preferences_db: String,
    pub char_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            preferences_db: "sqlite://./data/preferences.db".into(),
            char_interval_ms: 30,
        }
    }
}

/// Defaults, then the TOML file, then environment variables.
pub fn load_settings(config_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    } else if config_path.is_some() {
        warn!(path = %path.display(), "config file not readable; using defaults");
    }

    if let Ok(v) = std::env::var("SKIM_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Ok(v) = std::env::var("APP__PREFERENCES_DB") {
        settings.preferences_db = v;
    }

    if let Ok(v) = std::env::var("APP__CHAR_INTERVAL_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.char_interval_ms = parsed;
        }
    }

    settings
}

/// Accepts a sqlite url or a bare file path and returns a sqlite url.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().preferences_db;
    }

    if raw_database_url.starts_with("sqlite::memory:") || raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        return format!("sqlite://{}", path.replace('\\', "/"));
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!("ignoring malformed config file: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
        settings.server_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("preferences_db").and_then(toml::Value::as_str) {
        settings.preferences_db = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("char_interval_ms")
        .and_then(toml::Value::as_integer)
        .and_then(|v| u64::try_from(v).ok())
    {
        settings.char_interval_ms = v;
    }
}
