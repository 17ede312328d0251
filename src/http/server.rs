//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router sending every path to the resolution chain
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop accepting on the shutdown signal

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Router,
};
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ShortenerConfig;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::routing::Chain;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<Chain>,
}

/// HTTP front end for the resolution chain.
pub struct HttpServer {
    router: Router,
    chain: Arc<Chain>,
}

impl HttpServer {
    /// Create a new HTTP server serving `chain`.
    pub fn new(chain: Chain, config: &ShortenerConfig) -> Self {
        let chain = Arc::new(chain);
        let state = AppState {
            chain: chain.clone(),
        };
        let router = Self::build_router(config, state);

        Self { router, chain }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ShortenerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(resolve_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
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
            layers = ?self.chain.layer_names(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolves every request path through the chain.
async fn resolve_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = decoded_path(&uri);
    let resolved = state.chain.resolve(&path);

    tracing::debug!(
        request_id = %request_id(&headers),
        method = %method,
        path = %path,
        layer = resolved.layer.unwrap_or("default"),
        outcome = ?resolved.resolution,
        "Path resolved"
    );

    resolved.resolution.into_response()
}

/// The request path with percent-escapes decoded.
///
/// Falls back to the raw path when the decoded bytes are not UTF-8.
fn decoded_path(uri: &Uri) -> Cow<'_, str> {
    percent_decode_str(uri.path())
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(uri.path()))
}
