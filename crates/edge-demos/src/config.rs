//! Application configuration

use std::env;

use crate::handlers::{UnknownWorker, Worker};
use crate::runtime::services::containers::CONTAINER_DEFAULT_PORT;

/// Configuration errors that prevent startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    UnknownWorker(#[from] UnknownWorker),
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the gateway listens on
    pub port: u16,

    /// The worker hosted by this gateway
    pub worker: Worker,

    /// Name of the object bucket bound to the worker
    pub bucket: String,

    /// Name of the key-value namespace bound to the worker
    pub kv_namespace: String,

    /// Host where container instances listen
    pub container_host: String,

    /// Internal port of container instances
    pub container_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let worker = match lookup("EDGE_DEMOS_WORKER") {
            Some(name) => name.parse()?,
            None => Worker::ObjectStore,
        };

        Ok(Self {
            port: lookup("EDGE_DEMOS_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(8787),

            worker,

            bucket: lookup("EDGE_DEMOS_BUCKET").unwrap_or_else(|| "demo-bucket".to_string()),

            kv_namespace: lookup("EDGE_DEMOS_KV_NAMESPACE")
                .unwrap_or_else(|| "demo-kv".to_string()),

            container_host: lookup("EDGE_DEMOS_CONTAINER_HOST")
                .unwrap_or_else(|| "127.0.0.1".to_string()),

            container_port: lookup("EDGE_DEMOS_CONTAINER_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONTAINER_DEFAULT_PORT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8787);
        assert_eq!(config.worker, Worker::ObjectStore);
        assert_eq!(config.bucket, "demo-bucket");
        assert_eq!(config.kv_namespace, "demo-kv");
        assert_eq!(config.container_host, "127.0.0.1");
        assert_eq!(config.container_port, 8080);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("EDGE_DEMOS_PORT", "9000"),
            ("EDGE_DEMOS_WORKER", "read-modify-write"),
            ("EDGE_DEMOS_CONTAINER_PORT", "18080"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.worker, Worker::ReadModifyWrite);
        assert_eq!(config.container_port, 18080);
    }

    #[test]
    fn test_unparseable_port_falls_back_to_default() {
        let config = load(&[("EDGE_DEMOS_PORT", "not-a-port")]).unwrap();
        assert_eq!(config.port, 8787);
    }

    #[test]
    fn test_unknown_worker_is_rejected() {
        let err = load(&[("EDGE_DEMOS_WORKER", "cron")]).unwrap_err();
        assert_eq!(err.to_string(), "unknown worker: cron");
    }
}
