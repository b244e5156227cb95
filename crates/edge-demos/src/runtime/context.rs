//! Per-request context
//!
//! The gateway creates one [`Context`] per inbound request. It pairs the
//! worker's bindings with a fresh request id used to correlate log lines.

use uuid::Uuid;

use edge_demos_sdk::Env;

/// Request identifier for tracing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from a string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context for a single request
#[derive(Debug, Clone)]
pub struct Context {
    /// Bindings handed to the worker
    pub env: Env,

    /// Unique request identifier
    pub request_id: RequestId,
}

impl Context {
    /// Create a new context for a request
    pub fn new(env: Env) -> Self {
        Self {
            env,
            request_id: RequestId::new(),
        }
    }

    /// Create a context with a specific request ID
    pub fn with_request_id(env: Env, request_id: RequestId) -> Self {
        Self { env, request_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();
        assert_ne!(id1, id2);

        let id3 = RequestId::from_string("test-id".to_string());
        assert_eq!(id3.as_str(), "test-id");
        assert_eq!(id3.to_string(), "test-id");
    }

    #[test]
    fn test_contexts_get_distinct_ids() {
        let a = Context::new(Env::new());
        let b = Context::new(a.env.clone());
        assert_ne!(a.request_id, b.request_id);

        let c = Context::with_request_id(Env::new(), RequestId::from_string("req-123".into()));
        assert_eq!(c.request_id.as_str(), "req-123");
    }
}
