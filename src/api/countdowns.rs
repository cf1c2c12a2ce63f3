//! Countdown API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::countdown::{CountdownConfig, StoredCountdown},
};

use super::ShopSession;

/// List the shop's countdowns
#[utoipa::path(
    get,
    path = "/countdowns",
    tag = "countdowns",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Countdown list", body = Vec<StoredCountdown>)
    )
)]
pub async fn list_countdowns(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
) -> AppResult<Json<Vec<StoredCountdown>>> {
    let countdowns = state.services.countdowns.list(&shop).await?;
    Ok(Json(countdowns))
}

/// Create a countdown
#[utoipa::path(
    post,
    path = "/countdowns",
    tag = "countdowns",
    security(("bearer_auth" = [])),
    request_body = CountdownConfig,
    responses(
        (status = 201, description = "Countdown created", body = StoredCountdown),
        (status = 422, description = "Countdown configuration is invalid", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_countdown(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
    Json(config): Json<CountdownConfig>,
) -> AppResult<(StatusCode, Json<StoredCountdown>)> {
    let remote = state.shopify_repository(&shop).await?;
    let countdown = state
        .services
        .countdowns
        .create(&shop, &remote, config)
        .await?;
    Ok((StatusCode::CREATED, Json(countdown)))
}

/// Fetch a countdown
#[utoipa::path(
    get,
    path = "/countdowns/{id}",
    tag = "countdowns",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Countdown ID")),
    responses(
        (status = 200, description = "Countdown", body = StoredCountdown)
    )
)]
pub async fn get_countdown(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
    Path(id): Path<String>,
) -> AppResult<Json<StoredCountdown>> {
    let countdown = state.services.countdowns.get(&shop, &id).await?;
    Ok(Json(countdown))
}

/// Update a countdown
#[utoipa::path(
    put,
    path = "/countdowns/{id}",
    tag = "countdowns",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Countdown ID")),
    request_body = CountdownConfig,
    responses(
        (status = 200, description = "Countdown updated", body = StoredCountdown),
        (status = 422, description = "Countdown configuration is invalid", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_countdown(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
    Path(id): Path<String>,
    Json(config): Json<CountdownConfig>,
) -> AppResult<Json<StoredCountdown>> {
    let remote = state.shopify_repository(&shop).await?;
    let countdown = state
        .services
        .countdowns
        .update(&shop, &remote, &id, config)
        .await?;
    Ok(Json(countdown))
}

/// Delete a countdown
#[utoipa::path(
    delete,
    path = "/countdowns/{id}",
    tag = "countdowns",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Countdown ID")),
    responses(
        (status = 204, description = "Countdown deleted")
    )
)]
pub async fn delete_countdown(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let remote = state.shopify_repository(&shop).await?;
    state.services.countdowns.remove(&shop, &remote, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
