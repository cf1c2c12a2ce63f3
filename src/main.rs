//! Countdown Server - Shopify embedded admin backend
//!
//! REST API server managing countdown banner configurations and their
//! metaobject mirrors.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countdown_server::{
    api,
    config::AppConfig,
    notify::TracingNotifier,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("countdown_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Countdown Server v{}", env!("CARGO_PKG_VERSION"));

    // Open the database, creating it and running migrations when needed
    let repository = Repository::connect(&config.database)
        .await
        .expect("Failed to open database");

    tracing::info!("Connected to database");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let notifier = Arc::new(TracingNotifier);
    let services = Services::new(repository.clone(), notifier);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        repository,
        http: reqwest::Client::new(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Countdowns
        .route("/countdowns", get(api::countdowns::list_countdowns))
        .route("/countdowns", post(api::countdowns::create_countdown))
        .route("/countdowns/:id", get(api::countdowns::get_countdown))
        .route("/countdowns/:id", put(api::countdowns::update_countdown))
        .route("/countdowns/:id", delete(api::countdowns::delete_countdown))
        // Setup
        .route("/setup", get(api::setup::setup_status))
        .route("/setup", post(api::setup::configure_setup))
        .route("/setup", delete(api::setup::teardown_setup))
        // Shop
        .route("/shop", get(api::shop::get_shop))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
