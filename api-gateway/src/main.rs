//! Exchange proxy server
//!
//! Forwards balance and connectivity requests to exchange REST APIs on
//! behalf of geo-blocked callers.

use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_gateway::config::{AppConfig, DEFAULT_API_KEY};
use api_gateway::{build_router, ApiDoc, AppState};
use exchange_client::{ConnectorConfig, LiveConnectorFactory};

/// Exchange proxy server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address, overrides the PORT environment variable
    #[clap(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,exchange_client=debug")
        .unwrap();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    debug!("Debug logging enabled");

    // Load configuration once; it is handed to the router by value and
    // never read from the environment again
    let config = AppConfig::new();
    if config.api_key == DEFAULT_API_KEY {
        warn!("PROXY_API_KEY is not set, protected endpoints use the placeholder secret");
    }

    // The proxy serves callers behind geo-blocks, so it binds on all
    // interfaces unless told otherwise
    let addr = args
        .addr
        .unwrap_or_else(|| format!("0.0.0.0:{}", config.port));

    let state = Arc::new(AppState {
        config,
        connectors: Arc::new(LiveConnectorFactory::new(ConnectorConfig::from_env())),
    });

    // Combine the API routes with the Swagger UI
    let app = build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Start the server
    let addr: std::net::SocketAddr = addr.parse().expect("Invalid address");
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
