//! Container forwarder
//!
//! Every request goes, unmodified, to the singleton container instance.

use edge_demos_sdk::prelude::*;

/// Logical name of the only container instance this worker talks to
pub const SINGLETON_CONTAINER: &str = "singleton";

pub async fn handle(env: &Env, req: Request) -> Result<Response, HandlerError> {
    let containers = env.require_containers()?;
    let id = containers.id_from_name(SINGLETON_CONTAINER);
    let stub = containers.get(&id);
    Ok(stub.fetch(req).await?)
}

edge_demos_sdk::entry_point!(entry => handle);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use edge_demos_sdk::services::ServiceFuture;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::runtime::services::{ContainerConfig, HttpContainerNamespace};

    type Delivered = Arc<Mutex<Vec<(ContainerId, Request)>>>;

    /// Namespace that records what each stub receives
    #[derive(Default)]
    struct RecordingNamespace {
        delivered: Delivered,
    }

    struct RecordingStub {
        id: ContainerId,
        delivered: Delivered,
    }

    impl ContainerNamespace for RecordingNamespace {
        fn id_from_name(&self, name: &str) -> ContainerId {
            ContainerId::new(format!("id-of-{}", name))
        }

        fn get(&self, id: &ContainerId) -> Arc<dyn ContainerStub> {
            Arc::new(RecordingStub {
                id: id.clone(),
                delivered: self.delivered.clone(),
            })
        }
    }

    impl ContainerStub for RecordingStub {
        fn fetch(&self, request: Request) -> ServiceFuture<'_, Response> {
            self.delivered.lock().unwrap().push((self.id.clone(), request));
            Box::pin(async { Ok(Response::text(200, "from container")) })
        }
    }

    #[tokio::test]
    async fn test_every_request_reaches_the_singleton() {
        let namespace = Arc::new(RecordingNamespace::default());
        let env = Env::new().with_containers(namespace.clone());

        let requests = [
            Request::new(Method::GET, "/"),
            Request::new(Method::POST, "/api/items?limit=5")
                .with_header("authorization", "Bearer t")
                .with_body("{\"a\":1}"),
            Request::new(Method::DELETE, "/api/items/7"),
        ];

        for req in requests.iter().cloned() {
            let resp = handle(&env, req).await.unwrap();
            assert_eq!(resp.body_text(), "from container");
        }

        let delivered = namespace.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 3);
        for ((id, got), sent) in delivered.iter().zip(requests.iter()) {
            assert_eq!(id.as_str(), "id-of-singleton");
            assert_eq!(got.method, sent.method);
            assert_eq!(got.path_and_query(), sent.path_and_query());
            assert_eq!(got.headers, sent.headers);
            assert_eq!(got.body, sent.body);
        }
    }

    #[tokio::test]
    async fn test_forwards_over_http_and_returns_container_response() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/state"))
            .and(header("content-type", "text/plain"))
            .and(body_string("on"))
            .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
            .expect(1)
            .mount(&server)
            .await;

        let namespace = HttpContainerNamespace::new(ContainerConfig {
            host: server.address().ip().to_string(),
            port: server.address().port(),
        })
        .unwrap();
        let env = Env::new().with_containers(Arc::new(namespace));

        let req = Request::new(Method::PUT, "/state")
            .with_header("content-type", "text/plain")
            .with_body("on");
        let resp = handle(&env, req).await.unwrap();

        assert_eq!(resp.status, 202);
        assert_eq!(resp.body_text(), "queued");
    }
}
