//! Shop information endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::ShopSession;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShopInfoResponse {
    /// Shop domain the session acts on
    pub shop: String,
    /// UTC offset of the shop's timezone, e.g. "-05:00"
    pub timezone_offset: String,
}

/// Fetch the shop's timezone offset
#[utoipa::path(
    get,
    path = "/shop",
    tag = "shop",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shop information", body = ShopInfoResponse)
    )
)]
pub async fn get_shop(
    State(state): State<crate::AppState>,
    ShopSession { shop }: ShopSession,
) -> AppResult<Json<ShopInfoResponse>> {
    let remote = state.shopify_repository(&shop).await?;
    let timezone_offset = state.services.setup.shop_timezone_offset(&remote).await?;
    Ok(Json(ShopInfoResponse {
        shop,
        timezone_offset,
    }))
}
