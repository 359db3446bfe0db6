//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use paperforge_core::{ImageTextProvider, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_TEMPERATURE};

use crate::health;
use crate::process_image;

/// Application state shared across routes. Built once at startup, read-only after.
pub struct GatewayState {
    /// `None` when the provider needs an API key and none was configured.
    pub provider: Option<Arc<dyn ImageTextProvider>>,
    pub provider_name: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub include_section: bool,
    pub strict_errors: bool,
    pub max_upload_bytes: usize,
}

impl GatewayState {
    pub fn new(provider_name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: None,
            provider_name: provider_name.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            include_section: true,
            strict_errors: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_provider(mut self, provider: Option<Arc<dyn ImageTextProvider>>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_include_section(mut self, include: bool) -> Self {
        self.include_section = include;
        self
    }

    pub fn with_strict_errors(mut self, strict: bool) -> Self {
        self.strict_errors = strict;
        self
    }

    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }
}

/// Build the router with permissive CORS, request tracing and the upload limit.
pub fn build_router(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/process-image", post(process_image::process_image))
        .route("/api/health", get(health::get_health))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the HTTP server and runs until Ctrl+C or SIGTERM.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: Arc<GatewayState>) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Gateway HTTP server listening on http://{}", addr);
    info!("  POST /process-image - page text extraction");
    info!("  GET  /api/health    - health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, starting graceful shutdown"),
    }
}
