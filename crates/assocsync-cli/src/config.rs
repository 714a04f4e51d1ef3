use std::time::Duration;

use assocsync_core::{MAX_PAGE_SIZE, ReconcilerConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Applies command-line overrides on top of file and environment values.
    pub fn apply_overrides(&mut self, endpoint: Option<&str>, token: Option<&str>) {
        if let Some(endpoint) = endpoint {
            self.endpoint.base_url = endpoint.to_string();
        }
        if let Some(token) = token {
            self.endpoint.token = Some(token.to_string());
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.base_url.trim().is_empty() {
            return Err("endpoint.base_url must not be empty".into());
        }
        if self.endpoint.page_size == 0 || self.endpoint.page_size > MAX_PAGE_SIZE {
            return Err(format!("endpoint.page_size must be between 1 and {MAX_PAGE_SIZE}"));
        }
        if self.endpoint.request_timeout_ms == 0 {
            return Err("endpoint.request_timeout_ms must be > 0".into());
        }
        if self.timeouts.create_secs == 0
            || self.timeouts.read_secs == 0
            || self.timeouts.delete_secs == 0
        {
            return Err("timeouts must be > 0".into());
        }
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        Ok(())
    }

    pub fn reconciler_config(&self) -> ReconcilerConfig {
        ReconcilerConfig {
            page_size: self.endpoint.page_size,
            create_timeout: Duration::from_secs(self.timeouts.create_secs),
            read_timeout: Duration::from_secs(self.timeouts.read_secs),
            delete_timeout: Duration::from_secs(self.timeouts.delete_secs),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.endpoint.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}
fn default_base_url() -> String {
    "http://localhost:4566".into()
}
fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}
fn default_request_timeout_ms() -> u64 {
    30_000
}
impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            page_size: default_page_size(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_create_secs")]
    pub create_secs: u64,
    #[serde(default = "default_read_secs")]
    pub read_secs: u64,
    #[serde(default = "default_delete_secs")]
    pub delete_secs: u64,
}
fn default_create_secs() -> u64 {
    300
}
fn default_read_secs() -> u64 {
    60
}
fn default_delete_secs() -> u64 {
    300
}
impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            create_secs: default_create_secs(),
            read_secs: default_read_secs(),
            delete_secs: default_delete_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "warn".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    pub const DEFAULT_CONFIG_FILE: &str = "assocsync.toml";

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        match path {
            Some(p) => {
                let pathbuf = PathBuf::from(p);
                if !pathbuf.exists() {
                    return Err(format!("config file not found: {p}"));
                }
                builder = builder.add_source(File::from(pathbuf));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    builder = builder.add_source(File::from(default_path));
                }
            }
        }
        // Environment variable overrides, e.g., ASSOCSYNC__ENDPOINT__PAGE_SIZE=10
        builder = builder.add_source(
            Environment::with_prefix("ASSOCSYNC")
                .prefix_separator("__")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::loader::load_config;
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AppConfig::default();
        cfg.validate().expect("defaults validate");
        assert_eq!(cfg.reconciler_config(), ReconcilerConfig::default());
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn file_values_and_env_overrides() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("assocsync.toml");
        fs::write(
            &path,
            r#"
[endpoint]
base_url = "https://connect.internal.example.com"
page_size = 10

[timeouts]
create_secs = 120

[logging]
level = "debug"
"#,
        )
        .expect("write toml");

        let cfg = load_config(path.to_str()).expect("should parse config");
        assert_eq!(cfg.endpoint.base_url, "https://connect.internal.example.com");
        assert_eq!(cfg.endpoint.page_size, 10);
        assert_eq!(cfg.timeouts.create_secs, 120);
        assert_eq!(cfg.timeouts.delete_secs, 300);
        assert_eq!(cfg.logging.level, "debug");

        unsafe {
            env::set_var("ASSOCSYNC__TIMEOUTS__READ_SECS", "7");
        }
        let cfg_env = load_config(path.to_str()).expect("should parse config with env overrides");
        unsafe {
            env::remove_var("ASSOCSYNC__TIMEOUTS__READ_SECS");
        }
        assert_eq!(cfg_env.timeouts.read_secs, 7);
        assert_eq!(cfg_env.reconciler_config().read_timeout, Duration::from_secs(7));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[endpoint]\npage_size = 100\n").expect("write toml");
        let cfg = load_config(path.to_str()).expect("loading does not validate");
        let err = cfg.validate().expect_err("page size above max");
        assert!(err.contains("page_size"));

        let mut cfg = AppConfig::default();
        cfg.logging.level = "loud".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn endpoint_override_rescues_empty_base_url() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("empty.toml");
        fs::write(&path, "[endpoint]\nbase_url = \"\"\n").expect("write toml");

        let mut cfg = load_config(path.to_str()).expect("should parse config");
        assert!(cfg.validate().is_err());

        cfg.apply_overrides(Some("https://connect.internal.example.com"), Some("tok"));
        cfg.validate().expect("override makes config valid");
        assert_eq!(cfg.endpoint.base_url, "https://connect.internal.example.com");
        assert_eq!(cfg.endpoint.token.as_deref(), Some("tok"));

        cfg.apply_overrides(None, None);
        assert_eq!(cfg.endpoint.base_url, "https://connect.internal.example.com");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some("/nonexistent/assocsync.toml")).expect_err("missing file");
        assert!(err.contains("not found"));
    }
}
