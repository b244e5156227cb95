//! HTTP Response representation for workers

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};

/// Represents an outgoing HTTP response.
///
/// # Quick Reference
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `text(200, msg)` | any | Plain text confirmation |
/// | `not_found()` | 404 | Nothing at this path |
/// | `method_not_allowed(allow)` | 405 | Unsupported verb |
/// | `internal_error()` | 500 | Handler failed |
///
/// Bodies are raw bytes, so stored objects are passed through untouched:
/// ```ignore
/// Response::new(200).with_body(object.body.clone())
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response with the given status code (no body).
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Create a plain text response.
    ///
    /// # Example
    /// ```ignore
    /// Response::text(200, "Deleted!")
    /// Response::text(404, "Object Not Found")
    /// ```
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(body.into())
    }

    /// Create a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::text(404, "Not Found")
    }

    /// Create a 405 Method Not Allowed response advertising the allowed methods.
    pub fn method_not_allowed(allow: &str) -> Self {
        Self::text(405, "Method Not Allowed").with_header("Allow", allow)
    }

    /// Create a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::text(500, "Internal Server Error")
    }

    /// Set a header, replacing any previous value (builder pattern).
    /// Invalid names or values are skipped.
    ///
    /// # Example
    /// ```ignore
    /// Response::new(200)
    ///     .with_header("Cache-Control", "max-age=3600")
    ///     .with_header("etag", "\"abc\"")
    /// ```
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        match (HeaderName::try_from(key), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => tracing::warn!(header = %key, "Skipping invalid response header"),
        }
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value as a string.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).and_then(|v| v.to_str().ok())
    }

    /// Get the body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response() {
        let resp = Response::text(200, "Put a successfully!");
        assert_eq!(resp.status, 200);
        assert_eq!(resp.header("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(resp.body_text(), "Put a successfully!");
    }

    #[test]
    fn test_method_not_allowed() {
        let resp = Response::method_not_allowed("PUT, GET, DELETE");
        assert_eq!(resp.status, 405);
        assert_eq!(resp.header("allow"), Some("PUT, GET, DELETE"));
        assert_eq!(resp.body_text(), "Method Not Allowed");
    }

    #[test]
    fn test_with_header_replaces() {
        let resp = Response::new(200)
            .with_header("etag", "\"one\"")
            .with_header("ETag", "\"two\"");
        assert_eq!(resp.headers.get_all("etag").iter().count(), 1);
        assert_eq!(resp.header("etag"), Some("\"two\""));
    }
}
