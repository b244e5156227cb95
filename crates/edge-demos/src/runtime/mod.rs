//! Runtime module - the local stand-in for the edge platform
//!
//! - Per-request context (request id + bindings)
//! - Actor-based services backing the key-value and bucket bindings
//! - HTTP routing to container instances

pub mod context;
pub mod services;
pub mod actor;

pub use context::{Context, RequestId};
pub use services::Services;
