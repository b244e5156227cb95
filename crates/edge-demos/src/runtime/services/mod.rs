//! Services backing the worker bindings
//!
//! - Key-value namespace (in-memory actor)
//! - Object bucket (in-memory actor)
//! - Container namespace (HTTP routing to container instances)

pub mod kv;
pub mod storage;
pub mod containers;
mod bridge;

use std::sync::Arc;

use edge_demos_sdk::Env;

pub use edge_demos_sdk::ServiceError;
pub use kv::{KvConfig, KvStore};
pub use storage::{ObjectStore, StorageConfig};
pub use containers::{ContainerConfig, HttpContainerNamespace};

use crate::config::AppConfig;

/// Container for all running services
///
/// Owns the service handles for the lifetime of the gateway and hands out an
/// [`Env`] that exposes them to the worker.
#[derive(Clone)]
pub struct Services {
    /// Key-value namespace
    pub kv: KvStore,

    /// Object bucket
    pub storage: ObjectStore,

    /// Container namespace
    pub containers: Arc<HttpContainerNamespace>,
}

impl Services {
    /// Start all services described by the configuration
    pub async fn start(config: &AppConfig) -> Result<Self, ServiceError> {
        let kv = KvStore::start(KvConfig {
            namespace: config.kv_namespace.clone(),
        })
        .await?;

        let storage = ObjectStore::start(StorageConfig {
            bucket: config.bucket.clone(),
        })
        .await?;

        let containers = Arc::new(HttpContainerNamespace::new(ContainerConfig {
            host: config.container_host.clone(),
            port: config.container_port,
        })?);

        Ok(Self { kv, storage, containers })
    }

    /// Bindings for the hosted worker
    pub fn env(&self) -> Env {
        Env::new()
            .with_kv(Arc::new(self.kv.clone()))
            .with_bucket(Arc::new(self.storage.clone()))
            .with_containers(self.containers.clone())
    }

    /// Stop the service actors
    pub async fn shutdown(&self) {
        self.kv.shutdown().await;
        self.storage.shutdown().await;
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("kv", &self.kv)
            .field("storage", &self.storage)
            .field("containers", &self.containers.target_url().as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_env_exposes_every_binding() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let services = Services::start(&config).await.unwrap();
        let env = services.env();

        env.require_kv().unwrap().put("k", "v".to_string()).await.unwrap();
        assert_eq!(services.kv.get("k").await.unwrap(), Some("v".to_string()));
        assert!(env.require_bucket().is_ok());
        assert!(env.require_containers().is_ok());
        assert!(format!("{:?}", services).contains("containers: \"http://127.0.0.1:8080/\""));

        services.shutdown().await;
    }
}
