//! Object-store request router
//!
//! `PUT /<key>` stores the body, `GET /<key>` returns it with its content
//! headers and ETag, `DELETE /<key>` removes it. The key is the URL path
//! without its leading slash.

use edge_demos_sdk::prelude::*;

/// Methods this worker answers
pub const ALLOWED_METHODS: &str = "PUT, GET, DELETE";

pub async fn handle(env: &Env, req: Request) -> Result<Response, HandlerError> {
    let bucket = env.require_bucket()?;
    let key = req.key();

    match req.method {
        Method::PUT => {
            let metadata = HttpMetadata::from_headers(&req.headers);
            bucket.put(key, req.body.clone(), metadata).await?;
            Ok(Response::text(200, format!("Put {} successfully!", key)))
        }
        Method::GET => {
            let Some(object) = bucket.get(key).await? else {
                return Ok(Response::text(404, "Object Not Found"));
            };

            let mut response = Response::new(200).with_body(object.body.clone());
            object.write_http_metadata(&mut response.headers);
            Ok(response.with_header("etag", &object.http_etag()))
        }
        Method::DELETE => {
            bucket.delete(key).await?;
            Ok(Response::text(200, "Deleted!"))
        }
        _ => Ok(Response::method_not_allowed(ALLOWED_METHODS)),
    }
}

edge_demos_sdk::entry_point!(entry => handle);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::TestBindings;

    async fn call(env: &Env, req: Request) -> Response {
        handle(env, req).await.unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get_returns_body() {
        let bindings = TestBindings::start().await;
        let env = bindings.env();

        let upload = Request::new(Method::PUT, "/docs/readme.txt").with_body("hello");
        let put = call(&env, upload).await;
        assert_eq!(put.status, 200);
        assert_eq!(put.body_text(), "Put docs/readme.txt successfully!");

        let get = call(&env, Request::new(Method::GET, "/docs/readme.txt")).await;
        assert_eq!(get.status, 200);
        assert_eq!(get.body_text(), "hello");
    }

    #[tokio::test]
    async fn test_get_copies_content_headers_and_etag() {
        let bindings = TestBindings::start().await;
        let env = bindings.env();

        let upload = Request::new(Method::PUT, "/cat.png")
            .with_header("Content-Type", "image/png")
            .with_header("Cache-Control", "max-age=600")
            .with_body(&b"\x89PNG"[..]);
        call(&env, upload).await;

        let get = call(&env, Request::new(Method::GET, "/cat.png")).await;
        let stored = bindings.storage.get("cat.png").await.unwrap().unwrap();
        assert_eq!(get.header("content-type"), Some("image/png"));
        assert_eq!(get.header("cache-control"), Some("max-age=600"));
        assert_eq!(get.header("etag"), Some(stored.http_etag().as_str()));
        assert!(get.header("etag").unwrap().starts_with('"'));
        assert_eq!(&get.body[..], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_get_missing_is_404() {
        let bindings = TestBindings::start().await;

        let get = call(&bindings.env(), Request::new(Method::GET, "/never-written")).await;
        assert_eq!(get.status, 404);
        assert_eq!(get.body_text(), "Object Not Found");
    }

    #[tokio::test]
    async fn test_delete_removes_object() {
        let bindings = TestBindings::start().await;
        let env = bindings.env();

        call(&env, Request::new(Method::PUT, "/k").with_body("v")).await;
        let delete = call(&env, Request::new(Method::DELETE, "/k")).await;
        assert_eq!(delete.status, 200);
        assert_eq!(delete.body_text(), "Deleted!");

        let get = call(&env, Request::new(Method::GET, "/k")).await;
        assert_eq!(get.status, 404);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let bindings = TestBindings::start().await;

        let delete = call(&bindings.env(), Request::new(Method::DELETE, "/ghost")).await;
        assert_eq!(delete.status, 200);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let bindings = TestBindings::start().await;
        let env = bindings.env();

        call(&env, Request::new(Method::PUT, "/k").with_body("first")).await;
        call(&env, Request::new(Method::PUT, "/k").with_body("second")).await;

        let get = call(&env, Request::new(Method::GET, "/k")).await;
        assert_eq!(get.body_text(), "second");
    }

    #[tokio::test]
    async fn test_query_string_is_ignored_for_key() {
        let bindings = TestBindings::start().await;
        let env = bindings.env();

        call(&env, Request::new(Method::PUT, "/k?v=1").with_body("x")).await;
        let get = call(&env, Request::new(Method::GET, "/k")).await;
        assert_eq!(get.body_text(), "x");
    }

    #[tokio::test]
    async fn test_other_methods_are_rejected() {
        let bindings = TestBindings::start().await;
        let env = bindings.env();

        for method in [Method::POST, Method::PATCH, Method::HEAD, Method::OPTIONS] {
            let resp = call(&env, Request::new(method, "/k")).await;
            assert_eq!(resp.status, 405);
            assert_eq!(resp.header("allow"), Some("PUT, GET, DELETE"));
        }
        assert!(bindings.storage.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_bucket_binding_is_an_error() {
        let result = handle(&Env::new(), Request::new(Method::GET, "/k")).await;
        assert!(result.is_err());
    }
}
