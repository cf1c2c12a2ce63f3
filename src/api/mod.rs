//! API handlers for the countdown REST endpoints

pub mod countdowns;
pub mod health;
pub mod openapi;
pub mod setup;
pub mod shop;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::{error::AppError, models::shop::SessionClaims, AppState};

/// Extractor for the tenant shop named by a verified session token
pub struct ShopSession {
    pub shop: String,
}

#[async_trait]
impl FromRequestParts<AppState> for ShopSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication("Invalid authorization header format".to_string()));
        }

        let token = &auth_header[7..];

        // Verify the session token against the app credentials
        let claims = SessionClaims::from_token(
            token,
            &state.config.shopify.api_secret,
            &state.config.shopify.api_key,
        )
        .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(ShopSession {
            shop: claims.shop_domain().to_string(),
        })
    }
}
