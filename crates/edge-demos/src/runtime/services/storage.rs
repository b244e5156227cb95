//! Object Storage actor service
//!
//! Backs the worker's bucket binding with an in-memory object map owned by a
//! single actor task. Each object keeps its content headers, a SHA-256 entity
//! tag and its upload time.

use std::collections::HashMap;
use bytes::Bytes;
use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::sync::{mpsc, oneshot};

use edge_demos_sdk::services::{HttpMetadata, StoredObject};

use crate::runtime::actor::{spawn_service, ServiceCommand, ServiceHandle};
use super::ServiceError;

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket name, used in logs
    pub bucket: String,
}

/// Commands sent to the storage actor
pub enum StorageCommand {
    /// Upload an object
    Put {
        key: String,
        body: Bytes,
        metadata: HttpMetadata,
        reply: oneshot::Sender<()>,
    },

    /// Download an object
    Get {
        key: String,
        reply: oneshot::Sender<Option<StoredObject>>,
    },

    /// Delete an object
    Delete {
        key: String,
        reply: oneshot::Sender<()>,
    },

    /// Shutdown
    Shutdown,
}

impl ServiceCommand for StorageCommand {}

/// Object storage service handle - cheap to clone
#[derive(Clone)]
pub struct ObjectStore {
    handle: ServiceHandle<StorageCommand>,
    config: StorageConfig,
}

impl ObjectStore {
    /// Start the storage actor and return a handle
    pub async fn start(config: StorageConfig) -> Result<Self, ServiceError> {
        let config_clone = config.clone();

        let handle = spawn_service("storage", 50, move |rx| {
            storage_actor(config_clone, rx)
        });

        Ok(Self { handle, config })
    }

    /// Upload an object
    pub async fn put(
        &self,
        key: &str,
        body: Bytes,
        metadata: HttpMetadata,
    ) -> Result<(), ServiceError> {
        self.handle.request(|reply| StorageCommand::Put {
            key: key.to_string(),
            body,
            metadata,
            reply,
        }).await
    }

    /// Download an object
    pub async fn get(&self, key: &str) -> Result<Option<StoredObject>, ServiceError> {
        self.handle.request(|reply| StorageCommand::Get {
            key: key.to_string(),
            reply,
        }).await
    }

    /// Delete an object
    pub async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        self.handle.request(|reply| StorageCommand::Delete {
            key: key.to_string(),
            reply,
        }).await
    }

    /// Ask the actor to stop. Later calls fail with `Unavailable`.
    pub async fn shutdown(&self) {
        let _ = self.handle.send(StorageCommand::Shutdown).await;
    }
}

impl std::fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("bucket", &self.config.bucket)
            .field("alive", &self.handle.is_alive())
            .finish()
    }
}

/// Hex SHA-256 of an object body
pub fn compute_etag(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}

/// In-memory object map
struct MemoryStorage {
    objects: HashMap<String, StoredObject>,
}

impl MemoryStorage {
    fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    fn put(&mut self, key: String, body: Bytes, http_metadata: HttpMetadata) {
        let object = StoredObject {
            key: key.clone(),
            etag: compute_etag(&body),
            size: body.len() as u64,
            uploaded: Utc::now(),
            body,
            http_metadata,
        };
        self.objects.insert(key, object);
    }

    fn get(&self, key: &str) -> Option<&StoredObject> {
        self.objects.get(key)
    }

    fn delete(&mut self, key: &str) -> bool {
        self.objects.remove(key).is_some()
    }
}

/// The storage actor loop
async fn storage_actor(config: StorageConfig, mut rx: mpsc::Receiver<StorageCommand>) {
    tracing::info!("Starting storage actor ({})", config.bucket);

    let mut storage = MemoryStorage::new();

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StorageCommand::Put { key, body, metadata, reply } => {
                tracing::debug!(
                    bucket = %config.bucket,
                    key = %key,
                    size = body.len(),
                    "object put"
                );
                storage.put(key, body, metadata);
                let _ = reply.send(());
            }

            StorageCommand::Get { key, reply } => {
                let _ = reply.send(storage.get(&key).cloned());
            }

            StorageCommand::Delete { key, reply } => {
                let existed = storage.delete(&key);
                tracing::debug!(bucket = %config.bucket, key = %key, existed, "object delete");
                let _ = reply.send(());
            }

            StorageCommand::Shutdown => {
                tracing::info!("Storage actor shutting down");
                break;
            }
        }
    }

    tracing::info!("Storage actor stopped");
}
