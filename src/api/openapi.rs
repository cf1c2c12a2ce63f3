//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{countdowns, health, setup, shop};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Countdown API",
        version = "1.0.0",
        description = "Shopify countdown banner admin REST API",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Countdowns
        countdowns::list_countdowns,
        countdowns::create_countdown,
        countdowns::get_countdown,
        countdowns::update_countdown,
        countdowns::delete_countdown,
        // Setup
        setup::setup_status,
        setup::configure_setup,
        setup::teardown_setup,
        // Shop
        shop::get_shop,
    ),
    components(
        schemas(
            // Countdowns
            crate::models::countdown::StoredCountdown,
            crate::models::countdown::CountdownConfig,
            crate::models::countdown::CountdownMode,
            crate::models::schedule::WeekSchedule,
            crate::models::schedule::ActiveDay,
            crate::models::schedule::HoursRange,
            crate::models::schedule::Weekday,
            crate::form::ValidationIssue,
            // Setup
            setup::SetupStatusResponse,
            // Shop
            shop::ShopInfoResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "countdowns", description = "Countdown management"),
        (name = "setup", description = "Metaobject definition setup"),
        (name = "shop", description = "Shop information")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
