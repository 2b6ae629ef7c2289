//! API gateway for the exchange proxy
//!
//! A thin authenticated relay: requests carry exchange credentials, the
//! gateway validates a static bearer token, builds a request-scoped
//! exchange connector and maps the outcome to JSON.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use exchange_client::ConnectorFactory;

use crate::config::AppConfig;

/// App state shared across handlers
///
/// Read-only after construction; this is the only state that outlives
/// a single request.
pub struct AppState {
    /// Gateway configuration
    pub config: AppConfig,
    /// Builder for request-scoped exchange connectors
    pub connectors: Arc<dyn ConnectorFactory>,
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::balance::fetch_balance,
        api::connection::test_connection,
    ),
    components(
        schemas(
            api::balance::BalanceRequest,
            api::connection::ConnectionTestRequest,
            api::response::HealthResponse,
            api::response::BalanceResponse,
            api::response::ConnectionTestResponse,
        )
    ),
    tags(
        (name = "proxy", description = "Exchange proxy endpoints")
    ),
    info(
        title = "Exchange Proxy API",
        version = "1.0.0",
        description = "Authenticated relay forwarding balance and connectivity requests to exchange REST APIs"
    )
)]
pub struct ApiDoc;

/// Build the gateway router
///
/// The bearer check is layered onto the protected routes only; the
/// health check is mounted beside them and never sees it.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/balance", post(api::balance::fetch_balance))
        .route("/test-connection", post(api::connection::test_connection))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    // Same permissive CORS the proxy has always answered with
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health::health_check))
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
