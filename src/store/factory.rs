//! Template store factory.

use std::sync::Arc;
use std::time::Duration;

use crate::config::StoreConfig;

use super::http::HttpTemplateStore;
use super::memory::MemoryTemplateStore;
use super::{StoreResult, TemplateStore};

/// Create a template store from configuration.
///
/// `backend = "http"` builds an [`HttpTemplateStore`] against the
/// configured portal URL; anything else (including the default
/// `"memory"`) builds a [`MemoryTemplateStore`], with a warning when the
/// name is not recognized.
pub fn create_template_store(config: &StoreConfig) -> StoreResult<Arc<dyn TemplateStore>> {
    match config.backend.as_str() {
        "http" => {
            tracing::info!(
                backend = "http",
                url = %config.url,
                timeout_seconds = config.timeout_seconds,
                "Creating HTTP template store"
            );
            let store = HttpTemplateStore::new(
                config.url.clone(),
                Duration::from_secs(config.timeout_seconds),
            )?;
            Ok(Arc::new(store))
        }
        "memory" => {
            tracing::info!(backend = "memory", "Creating memory template store");
            Ok(Arc::new(MemoryTemplateStore::new()))
        }
        other => {
            tracing::warn!(
                backend = %other,
                "Unknown template store backend, falling back to memory"
            );
            Ok(Arc::new(MemoryTemplateStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_by_default() {
        let store = create_template_store(&StoreConfig::default()).unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_backend_falls_back_to_memory() {
        let config = StoreConfig {
            backend: "postgres".to_string(),
            ..StoreConfig::default()
        };
        let store = create_template_store(&config).unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[test]
    fn test_http_backend_builds() {
        let config = StoreConfig {
            backend: "http".to_string(),
            ..StoreConfig::default()
        };
        assert!(create_template_store(&config).is_ok());
    }
}
