//! Key-value actor service
//!
//! Backs the worker's KV binding with an in-memory map owned by a single
//! actor task. Reads and writes are independent commands: a worker that reads,
//! modifies and writes back gets no atomicity from this service.

use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

use crate::runtime::actor::{spawn_service, ServiceCommand, ServiceHandle};
use super::ServiceError;

/// Key-value namespace configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Namespace name, used in logs
    pub namespace: String,
}

/// Commands sent to the KV actor
pub enum KvCommand {
    /// Get a value by key
    Get {
        key: String,
        reply: oneshot::Sender<Option<String>>,
    },

    /// Set a value
    Put {
        key: String,
        value: String,
        reply: oneshot::Sender<()>,
    },

    /// Shutdown
    Shutdown,
}

impl ServiceCommand for KvCommand {}

/// KV service handle - cheap to clone
#[derive(Clone)]
pub struct KvStore {
    handle: ServiceHandle<KvCommand>,
    config: KvConfig,
}

impl KvStore {
    /// Start the KV actor and return a handle
    pub async fn start(config: KvConfig) -> Result<Self, ServiceError> {
        let config_clone = config.clone();

        let handle = spawn_service("kv", 100, move |rx| {
            kv_actor(config_clone, rx)
        });

        Ok(Self { handle, config })
    }

    /// Get a value by key
    pub async fn get(&self, key: &str) -> Result<Option<String>, ServiceError> {
        self.handle.request(|reply| KvCommand::Get {
            key: key.to_string(),
            reply,
        }).await
    }

    /// Set a value, replacing any previous one
    pub async fn put(&self, key: &str, value: String) -> Result<(), ServiceError> {
        self.handle.request(|reply| KvCommand::Put {
            key: key.to_string(),
            value,
            reply,
        }).await
    }

    /// Ask the actor to stop. Later calls fail with `Unavailable`.
    pub async fn shutdown(&self) {
        let _ = self.handle.send(KvCommand::Shutdown).await;
    }
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore")
            .field("namespace", &self.config.namespace)
            .field("alive", &self.handle.is_alive())
            .finish()
    }
}

/// The KV actor loop
async fn kv_actor(config: KvConfig, mut rx: mpsc::Receiver<KvCommand>) {
    tracing::info!("Starting kv actor ({})", config.namespace);

    let mut store: HashMap<String, String> = HashMap::new();

    while let Some(cmd) = rx.recv().await {
        match cmd {
            KvCommand::Get { key, reply } => {
                let _ = reply.send(store.get(&key).cloned());
            }

            KvCommand::Put { key, value, reply } => {
                tracing::debug!(namespace = %config.namespace, key = %key, "kv put");
                store.insert(key, value);
                let _ = reply.send(());
            }

            KvCommand::Shutdown => {
                tracing::info!("Kv actor shutting down");
                break;
            }
        }
    }

    tracing::info!("Kv actor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn start() -> KvStore {
        KvStore::start(KvConfig { namespace: "test".to_string() }).await.unwrap()
    }

    #[tokio::test]
    async fn test_kv_basic_operations() {
        let kv = start().await;

        // Non-existent key
        assert!(kv.get("missing").await.unwrap().is_none());

        // Put and get
        kv.put("key1", "value1".to_string()).await.unwrap();
        assert_eq!(kv.get("key1").await.unwrap(), Some("value1".to_string()));

        // Last write wins
        kv.put("key1", "value2".to_string()).await.unwrap();
        assert_eq!(kv.get("key1").await.unwrap(), Some("value2".to_string()));
    }

    #[tokio::test]
    async fn test_calls_fail_after_shutdown() {
        let kv = start().await;
        kv.shutdown().await;

        let err = kv.get("key1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }
}
