//! edge-demos SDK - Types and utilities for writing edge-demos workers
//!
//! This crate provides the request/response types, the binding traits
//! (key-value namespace, object bucket, container namespace) and the
//! [`Env`] through which a worker reaches them.

pub mod request;
pub mod response;
pub mod services;
pub mod env;
pub mod error;
pub mod handler;

pub mod prelude {
    //! Common imports for edge-demos workers
    pub use crate::request::Request;
    pub use crate::response::Response;
    pub use crate::services::{
        Bucket, ContainerId, ContainerNamespace, ContainerStub, HttpMetadata, KvNamespace,
        StoredObject,
    };
    pub use crate::env::Env;
    pub use crate::error::{HandlerError, ServiceError};
    pub use bytes::Bytes;
    pub use http::Method;
}

// Re-export key types at crate root
pub use request::Request;
pub use response::Response;
pub use env::Env;
pub use error::{HandlerError, ServiceError};
