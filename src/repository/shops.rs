//! Shop install registry methods on Repository

use chrono::Utc;

use super::Repository;
use crate::error::{AppError, AppResult};
use crate::models::Shop;

impl Repository {
    /// Look up an installed shop by domain
    pub async fn shops_get(&self, shop: &str) -> AppResult<Shop> {
        sqlx::query_as::<_, Shop>(
            "SELECT shop, access_token, installed_at FROM shops WHERE shop = $1",
        )
        .bind(shop)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shop {} is not installed", shop)))
    }

    /// Record an install, replacing any previously stored token.
    /// Called by whatever performs the OAuth token exchange.
    pub async fn shops_upsert(&self, shop: &str, access_token: &str) -> AppResult<Shop> {
        sqlx::query_as::<_, Shop>(
            "INSERT INTO shops (shop, access_token, installed_at) VALUES ($1, $2, $3) \
             ON CONFLICT (shop) DO UPDATE SET access_token = excluded.access_token \
             RETURNING shop, access_token, installed_at",
        )
        .bind(shop)
        .bind(access_token)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
