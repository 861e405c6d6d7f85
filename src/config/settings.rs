use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::template::MissingPolicy;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store backend: "memory" or "http"
    #[serde(default = "default_store_backend")]
    pub backend: String,
    /// Base URL of the portal template API (http backend only)
    #[serde(default = "default_store_url")]
    pub url: String,
    /// Per-request timeout in seconds (http backend only)
    #[serde(default = "default_store_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    /// Registry TOML file; when set it replaces the built-in catalog
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// What to do with variables absent from the render context
    #[serde(default)]
    pub missing: MissingPolicy,
}

fn default_store_backend() -> String {
    "memory".to_string()
}

fn default_store_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_store_timeout() -> u64 {
    10
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("store.backend", "memory")?
            .set_default("store.url", default_store_url())?
            .set_default("store.timeout_seconds", 10)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // STORE_BACKEND, STORE_URL, REGISTRY_FILE, etc.
            .add_source(Environment::default().separator("_").try_parsing(true));

        builder.build()?.try_deserialize()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            url: default_store_url(),
            timeout_seconds: default_store_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let store = StoreConfig::default();
        assert_eq!(store.backend, "memory");
        assert_eq!(store.timeout_seconds, 10);

        let render = RenderConfig::default();
        assert_eq!(render.missing, MissingPolicy::KeepPlaceholder);
    }
}
