//! Metaobject definition setup endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::ShopSession;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatusResponse {
    /// Whether the countdown metaobject definition exists on the shop
    pub configured: bool,
    /// Definition ID when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<String>,
}

/// Report whether the shop holds the countdown metaobject definition
#[utoipa::path(
    get,
    path = "/setup",
    tag = "setup",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Setup status", body = SetupStatusResponse)
    )
)]
pub async fn setup_status(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
) -> AppResult<Json<SetupStatusResponse>> {
    let remote = state.shopify_repository(&shop).await?;
    let definition_id = state.services.setup.status(&remote).await?;
    Ok(Json(SetupStatusResponse {
        configured: definition_id.is_some(),
        definition_id,
    }))
}

/// Create the countdown metaobject definition
#[utoipa::path(
    post,
    path = "/setup",
    tag = "setup",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Definition created")
    )
)]
pub async fn configure_setup(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
) -> AppResult<StatusCode> {
    let remote = state.shopify_repository(&shop).await?;
    state.services.setup.configure(&remote).await?;
    Ok(StatusCode::CREATED)
}

/// Remove the countdown metaobject definition
#[utoipa::path(
    delete,
    path = "/setup",
    tag = "setup",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Definition removed")
    )
)]
pub async fn teardown_setup(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
) -> AppResult<StatusCode> {
    let remote = state.shopify_repository(&shop).await?;
    state.services.setup.teardown(&remote).await?;
    Ok(StatusCode::NO_CONTENT)
}
