//! Handler entry points
//!
//! A worker is written as a plain async function borrowing its [`Env`]:
//!
//! ```ignore
//! use edge_demos_sdk::prelude::*;
//!
//! pub async fn handle(env: &Env, req: Request) -> Result<Response, HandlerError> {
//!     let value = env.require_kv()?.get(req.key()).await?;
//!     Ok(Response::text(200, value.unwrap_or_default()))
//! }
//!
//! edge_demos_sdk::entry_point!(entry => handle);
//! ```
//!
//! The host stores `entry` as a [`HandlerFn`] and calls it once per request.

use std::future::Future;
use std::pin::Pin;

use crate::{Env, HandlerError, Request, Response};

/// Type alias for boxed future returned by handlers
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type alias for the handler entry point signature
pub type HandlerFn = fn(Env, Request) -> BoxFuture<'static, Result<Response, HandlerError>>;

/// Macro for defining a [`HandlerFn`] entry point around an async handler
///
/// # Example
///
/// ```ignore
/// async fn hello(_env: &Env, _req: Request) -> Result<Response, HandlerError> {
///     Ok(Response::text(200, "Hello!\n"))
/// }
///
/// entry_point!(entry => hello);
/// ```
#[macro_export]
macro_rules! entry_point {
    ($entry:ident => $handler:path) => {
        pub fn $entry(
            env: $crate::Env,
            req: $crate::Request,
        ) -> $crate::handler::BoxFuture<
            'static,
            ::std::result::Result<$crate::Response, $crate::HandlerError>,
        > {
            ::std::boxed::Box::pin(async move { $handler(&env, req).await })
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceError;

    async fn echo_key(env: &Env, req: Request) -> Result<Response, HandlerError> {
        env.require_kv()?;
        Ok(Response::text(200, req.key()))
    }

    entry_point!(echo_entry => echo_key);

    #[test]
    fn test_handler_error_conversion() {
        let err = HandlerError::from(ServiceError::Unavailable("bucket actor closed".into()));
        let response: Response = err.into();
        assert_eq!(response.status, 500);
        assert_eq!(response.body_text(), "Internal Server Error");
    }

    #[tokio::test]
    async fn test_entry_point_propagates_handler_error() {
        let entry: HandlerFn = echo_entry;
        let result = entry(Env::new(), Request::default()).await;
        assert!(matches!(
            result,
            Err(HandlerError::Service(ServiceError::NotConfigured("kv")))
        ));
    }
}
