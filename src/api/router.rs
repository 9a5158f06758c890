//! API router configuration.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    api_info, delete_session, execute_terminal, get_session, health, list_files, list_sessions,
    AppState,
};
use crate::security::{rate_limit_middleware, RateLimitConfig, RateLimiter};

/// Create the API router with the given state and a default rate limiter.
pub fn create_router_with_state(state: AppState) -> Router {
    create_router_with_limiter(state, Arc::new(RateLimiter::default()))
}

/// Create the API router with custom state and rate limiter.
pub fn create_router_with_limiter(state: AppState, limiter: Arc<RateLimiter>) -> Router {
    // Session routes
    let session_routes = Router::new()
        .route("/", get(list_sessions))
        .route("/{id}", get(get_session).delete(delete_session));

    // API v1 routes
    let api_v1 = Router::new()
        .route("/", get(api_info))
        .route("/terminal", post(execute_terminal))
        .route("/files", get(list_files))
        .nest("/sessions", session_routes);

    // Build main router. CORS mirrors the permissive headers the desktop
    // frontend expects from both endpoints.
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1)
        .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Rate limiting applied in front of the API.
    pub rate_limit: RateLimitConfig,
    /// Enable graceful shutdown on ctrl-c.
    pub graceful_shutdown: bool,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    pub fn without_graceful_shutdown(mut self) -> Self {
        self.graceful_shutdown = false;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            rate_limit: RateLimitConfig::default(),
            graceful_shutdown: true,
        }
    }
}

/// Start the API server.
pub async fn serve(config: ServerConfig, state: AppState) -> crate::Result<()> {
    let addr = config.bind_address();
    let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
    let router = create_router_with_limiter(state, limiter);

    tracing::info!("Starting webdesk API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(crate::error::WebDeskError::Io)?;

    let service = router.into_make_service_with_connect_info::<SocketAddr>();

    let result = if config.graceful_shutdown {
        axum::serve(listener, service)
            .with_graceful_shutdown(shutdown_signal())
            .await
    } else {
        axum::serve(listener, service).await
    };

    result.map_err(|e| crate::error::WebDeskError::Io(std::io::Error::other(e.to_string())))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
