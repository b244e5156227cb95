//! Container namespace service
//!
//! Routes requests to container instances over HTTP. Instance lifecycle
//! (start, stop, scaling) belongs to whatever runs the containers; this
//! module only resolves names to ids and forwards requests to the instance's
//! internal port.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONNECTION, TRANSFER_ENCODING};
use sha2::{Digest, Sha256};
use url::Url;

use edge_demos_sdk::services::{ContainerId, ContainerNamespace, ContainerStub, ServiceFuture};
use edge_demos_sdk::{Request, Response};

use super::ServiceError;

/// Internal port container instances listen on
pub const CONTAINER_DEFAULT_PORT: u16 = 8080;

/// Container namespace configuration
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Host where instances listen
    pub host: String,

    /// Internal port of every instance
    pub port: u16,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: CONTAINER_DEFAULT_PORT,
        }
    }
}

/// Container namespace that reaches instances with an HTTP client
#[derive(Debug, Clone)]
pub struct HttpContainerNamespace {
    client: reqwest::Client,
    target: Url,
}

impl HttpContainerNamespace {
    pub fn new(config: ContainerConfig) -> Result<Self, ServiceError> {
        let target = Url::parse(&format!("http://{}:{}/", config.host, config.port))
            .map_err(|e| ServiceError::InvalidConfig(format!("container target: {}", e)))?;

        tracing::info!("Container namespace routing to {}", target);

        Ok(Self {
            client: reqwest::Client::new(),
            target,
        })
    }

    /// Base URL requests are forwarded to
    pub fn target_url(&self) -> &Url {
        &self.target
    }
}

impl ContainerNamespace for HttpContainerNamespace {
    fn id_from_name(&self, name: &str) -> ContainerId {
        ContainerId::new(hex::encode(Sha256::digest(name.as_bytes())))
    }

    fn get(&self, id: &ContainerId) -> Arc<dyn ContainerStub> {
        Arc::new(HttpContainerStub {
            id: id.clone(),
            client: self.client.clone(),
            target: self.target.clone(),
        })
    }
}

/// Routing handle for one instance
struct HttpContainerStub {
    id: ContainerId,
    client: reqwest::Client,
    target: Url,
}

impl HttpContainerStub {
    async fn forward(&self, request: Request) -> Result<Response, ServiceError> {
        let mut url = self.target.clone();
        url.set_path(&request.path);
        url.set_query(request.query.as_deref());

        // The body is already buffered; framing headers would describe the
        // inbound connection, not this one.
        let mut headers = request.headers;
        headers.remove(TRANSFER_ENCODING);
        headers.remove(CONNECTION);

        tracing::debug!(
            container = %self.id,
            request_id = %request.request_id,
            method = %request.method,
            url = %url,
            "Forwarding to container"
        );

        let upstream = self
            .client
            .request(request.method, url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;

        let status = upstream.status().as_u16();
        let mut headers = upstream.headers().clone();
        headers.remove(TRANSFER_ENCODING);
        headers.remove(CONNECTION);
        let body: Bytes = upstream
            .bytes()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;

        Ok(Response { status, headers, body })
    }
}

impl ContainerStub for HttpContainerStub {
    fn fetch(&self, request: Request) -> ServiceFuture<'_, Response> {
        Box::pin(self.forward(request))
    }
}
