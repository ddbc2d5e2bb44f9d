//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::bilibili::{BilibiliClient, UpstreamResult};
use crate::config::ServiceConfig;
use crate::http::cors::{cors_middleware, CorsPolicy};
use crate::http::handler::{get_parts, health, method_not_allowed, preflight};
use crate::http::request::UuidRequestId;

/// Path of the parts endpoint.
pub const PARTS_PATH: &str = "/bilibili-parts";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: BilibiliClient,
}

/// HTTP server for the parts proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> UpstreamResult<Self> {
        let client = BilibiliClient::new(
            config.upstream.clone(),
            config.observability.debug,
        )?;

        let state = AppState { client };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let cors = CorsPolicy::new(config.cors.allowed_origins.clone());

        Router::new()
            .route(
                PARTS_PATH,
                get(get_parts)
                    .head(method_not_allowed)
                    .options(preflight)
                    .fallback(method_not_allowed),
            )
            .route("/health", get(health))
            .with_state(state)
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(middleware::from_fn_with_state(cors, cors_middleware))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// The fully layered router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = PARTS_PATH,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
