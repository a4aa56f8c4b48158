use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub seed_test_data: bool,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            seed_test_data: true,
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then the settings file (if present), then the environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        settings.apply_file(&raw);
    }
    settings.apply_env(|key| std::env::var(key).ok());

    settings
}

impl Settings {
    pub fn apply_file(&mut self, raw: &str) {
        let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
            return;
        };

        if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
            self.server_bind = v.to_string();
        }
        if let Some(v) = file_cfg.get("seed_test_data").and_then(value_as_bool) {
            self.seed_test_data = v;
        }
        if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
            self.log_filter = v.to_string();
        }
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("SERVER_BIND") {
            self.server_bind = v;
        }
        if let Some(v) = var("APP__BIND_ADDR") {
            self.server_bind = v;
        }

        if let Some(v) = var("APP__SEED_TEST_DATA").as_deref().and_then(parse_bool) {
            self.seed_test_data = v;
        }

        if let Some(v) = var("APP__LOG_FILTER") {
            self.log_filter = v;
        }
    }
}

fn value_as_bool(value: &toml::Value) -> Option<bool> {
    match value {
        toml::Value::Boolean(v) => Some(*v),
        toml::Value::String(v) => parse_bool(v),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
