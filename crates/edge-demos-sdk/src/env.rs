//! Bindings handed to a worker on every request

use std::fmt;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::services::{Bucket, ContainerNamespace, KvNamespace};

/// Capability handles available to a worker.
///
/// Cheap to clone: every binding is reference counted. A worker asks for the
/// bindings it uses with the `require_*` accessors, which fail with
/// [`ServiceError::NotConfigured`] when the host did not provide one.
///
/// # Example
///
/// ```ignore
/// async fn handle(env: &Env, req: Request) -> Result<Response, HandlerError> {
///     let value = env.require_kv()?.get("counter").await?;
///     Ok(Response::text(200, value.unwrap_or_default()))
/// }
/// ```
#[derive(Clone, Default)]
pub struct Env {
    /// Key-value namespace
    pub kv: Option<Arc<dyn KvNamespace>>,

    /// Object bucket
    pub bucket: Option<Arc<dyn Bucket>>,

    /// Container namespace
    pub containers: Option<Arc<dyn ContainerNamespace>>,
}

impl Env {
    /// Create an environment with no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add key-value binding
    pub fn with_kv(mut self, kv: Arc<dyn KvNamespace>) -> Self {
        self.kv = Some(kv);
        self
    }

    /// Builder pattern: add bucket binding
    pub fn with_bucket(mut self, bucket: Arc<dyn Bucket>) -> Self {
        self.bucket = Some(bucket);
        self
    }

    /// Builder pattern: add container namespace binding
    pub fn with_containers(mut self, containers: Arc<dyn ContainerNamespace>) -> Self {
        self.containers = Some(containers);
        self
    }

    /// Get key-value binding or return error
    pub fn require_kv(&self) -> Result<&dyn KvNamespace, ServiceError> {
        self.kv.as_deref().ok_or(ServiceError::NotConfigured("kv"))
    }

    /// Get bucket binding or return error
    pub fn require_bucket(&self) -> Result<&dyn Bucket, ServiceError> {
        self.bucket.as_deref().ok_or(ServiceError::NotConfigured("bucket"))
    }

    /// Get container namespace binding or return error
    pub fn require_containers(&self) -> Result<&dyn ContainerNamespace, ServiceError> {
        self.containers
            .as_deref()
            .ok_or(ServiceError::NotConfigured("containers"))
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env")
            .field("kv", &self.kv.is_some())
            .field("bucket", &self.bucket.is_some())
            .field("containers", &self.containers.is_some())
            .finish()
    }
}
