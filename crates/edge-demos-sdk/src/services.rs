//! Binding traits
//!
//! Workers never talk to a storage engine or container runtime directly. They
//! receive trait objects through [`Env`](crate::Env); the host decides what
//! stands behind them (service actors, HTTP clients, or in-memory fakes in
//! tests).

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::error::ServiceError;
use crate::{Request, Response};

/// Boxed future returned by binding methods
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ServiceError>> + Send + 'a>>;

/// String-keyed key-value store
pub trait KvNamespace: Send + Sync {
    /// Read a value; `None` when the key was never written
    fn get<'a>(&'a self, key: &'a str) -> ServiceFuture<'a, Option<String>>;

    /// Write a value unconditionally (last write wins)
    fn put<'a>(&'a self, key: &'a str, value: String) -> ServiceFuture<'a, ()>;
}

/// Bucket-style object store
pub trait Bucket: Send + Sync {
    /// Fetch an object; `None` when absent
    fn get<'a>(&'a self, key: &'a str) -> ServiceFuture<'a, Option<StoredObject>>;

    /// Store `body` under `key`, replacing any previous object
    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Bytes,
        metadata: HttpMetadata,
    ) -> ServiceFuture<'a, ()>;

    /// Remove an object. Removing an absent key succeeds.
    fn delete<'a>(&'a self, key: &'a str) -> ServiceFuture<'a, ()>;
}

/// Namespace of named container instances
pub trait ContainerNamespace: Send + Sync {
    /// Resolve a logical name to an instance id. The same name always yields the same id.
    fn id_from_name(&self, name: &str) -> ContainerId;

    /// Obtain a routing stub for an instance
    fn get(&self, id: &ContainerId) -> Arc<dyn ContainerStub>;
}

/// Routing handle to a single container instance
pub trait ContainerStub: Send + Sync {
    /// Deliver `request` to the container's internal port and return its response
    fn fetch(&self, request: Request) -> ServiceFuture<'_, Response>;
}

/// Identifier of a container instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content headers stored alongside an object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpMetadata {
    pub content_type: Option<String>,
    pub content_language: Option<String>,
    pub content_disposition: Option<String>,
    pub content_encoding: Option<String>,
    pub cache_control: Option<String>,
    pub expires: Option<String>,
}

impl HttpMetadata {
    /// Capture the content headers of an upload
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            content_type: get(header::CONTENT_TYPE),
            content_language: get(header::CONTENT_LANGUAGE),
            content_disposition: get(header::CONTENT_DISPOSITION),
            content_encoding: get(header::CONTENT_ENCODING),
            cache_control: get(header::CACHE_CONTROL),
            expires: get(header::EXPIRES),
        }
    }

    /// Write every recorded header into `headers`
    pub fn write_to(&self, headers: &mut HeaderMap) {
        let fields = [
            (header::CONTENT_TYPE, &self.content_type),
            (header::CONTENT_LANGUAGE, &self.content_language),
            (header::CONTENT_DISPOSITION, &self.content_disposition),
            (header::CONTENT_ENCODING, &self.content_encoding),
            (header::CACHE_CONTROL, &self.cache_control),
            (header::EXPIRES, &self.expires),
        ];
        for (name, value) in fields {
            if let Some(value) = value.as_deref().and_then(|v| HeaderValue::from_str(v).ok()) {
                headers.insert(name, value);
            }
        }
    }
}

/// An object read back from a [`Bucket`]
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub body: Bytes,
    /// Unquoted entity tag
    pub etag: String,
    pub size: u64,
    pub uploaded: DateTime<Utc>,
    pub http_metadata: HttpMetadata,
}

impl StoredObject {
    /// The entity tag as it appears in an `ETag` header
    pub fn http_etag(&self) -> String {
        format!("\"{}\"", self.etag)
    }

    /// Write the stored content headers into `headers`
    pub fn write_http_metadata(&self, headers: &mut HeaderMap) {
        self.http_metadata.write_to(headers);
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
