//! Shopify Countdown Server
//!
//! Backend for an embedded Shopify admin app managing countdown banners,
//! persisting configurations relationally and mirroring each one into
//! the shop's metaobject store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod notify;
pub mod repository;
pub mod services;
pub mod shopify;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use repository::Repository;
use shopify::{AdminClient, ShopifyRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub repository: Repository,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build an Admin GraphQL channel scoped to one installed shop.
    ///
    /// The access token is resolved from the install registry on every
    /// request, so a shop that uninstalled the app is turned away before
    /// any Admin call is attempted.
    pub async fn shopify_repository(&self, shop: &str) -> AppResult<ShopifyRepository> {
        let install = self.repository.shops_get(shop).await?;
        let client = AdminClient::new(
            self.http.clone(),
            &install.shop,
            install.access_token,
            &self.config.shopify.api_version,
        );
        Ok(ShopifyRepository::new(Arc::new(client)))
    }
}
