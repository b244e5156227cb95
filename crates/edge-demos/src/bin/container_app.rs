//! container-app - The application that runs inside the container
//!
//! Answers every request with a greeting naming its configured message and
//! the id of the container instance it runs as.

use anyhow::Result;
use axum::{extract::State, http::Method, http::Uri, routing::any, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MESSAGE: &str = "Hello from Rust container!";

/// Settings read from the container's environment
#[derive(Debug, Clone)]
struct ContainerSettings {
    port: u16,
    message: String,
    instance_id: String,
}

impl ContainerSettings {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            message: lookup("MESSAGE").unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            instance_id: lookup("CLOUDFLARE_DURABLE_OBJECT_ID").unwrap_or_default(),
        }
    }

    fn greeting(&self) -> String {
        format!(
            "Hi, I'm a Rust container! Message: \"{}\", Instance ID: {}\n",
            self.message, self.instance_id
        )
    }
}

fn app(settings: Arc<ContainerSettings>) -> Router {
    Router::new()
        .route("/", any(greet))
        .route("/{*path}", any(greet))
        .with_state(settings)
}

async fn greet(
    State(settings): State<Arc<ContainerSettings>>,
    method: Method,
    uri: Uri,
) -> String {
    tracing::info!(method = %method, path = %uri.path(), "Request received");
    settings.greeting()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,container_app=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Arc::new(ContainerSettings::from_env());
    tracing::info!("Container settings: {:?}", settings);

    let addr = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("container-app listening on {}", addr);

    axum::serve(listener, app(settings).layer(TraceLayer::new_for_http())).await?;

    Ok(())
}
