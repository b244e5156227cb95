//! HTTP Request representation for workers

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;

/// Represents an incoming HTTP request
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method (GET, PUT, DELETE, etc.)
    pub method: Method,

    /// Request path, still percent-encoded (e.g., "/items/123")
    pub path: String,

    /// Raw query string without the leading `?`
    pub query: Option<String>,

    /// HTTP headers, in arrival order
    pub headers: HeaderMap,

    /// Request body
    pub body: Bytes,

    /// Request ID for tracing
    pub request_id: String,
}

impl Request {
    /// Create a request for `uri`, which may carry a query string.
    ///
    /// # Example
    /// ```ignore
    /// let req = Request::new(Method::GET, "/photos/cat.png?size=small");
    /// assert_eq!(req.path, "/photos/cat.png");
    /// assert_eq!(req.query.as_deref(), Some("size=small"));
    /// ```
    pub fn new(method: Method, uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (uri, None),
        };
        Self {
            method,
            path: path.to_string(),
            query,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            request_id: String::new(),
        }
    }

    /// The object key addressed by this request: the path without its leading slash.
    ///
    /// # Example
    /// ```ignore
    /// // PUT /reports/2024.csv
    /// let key = req.key(); // "reports/2024.csv"
    /// ```
    pub fn key(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }

    /// Path and query string as they appeared on the request line.
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    /// Get a header value as a string (case-insensitive lookup).
    /// Values that are not visible ASCII are treated as absent.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).and_then(|v| v.to_str().ok())
    }

    /// Append a header (builder pattern). Invalid names or values are skipped.
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        match (HeaderName::try_from(key), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => tracing::warn!(header = %key, "Skipping invalid request header"),
        }
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new(Method::GET, "/")
    }
}
