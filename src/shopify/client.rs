//! Reqwest-backed Admin API channel

use async_trait::async_trait;
use serde_json::{json, Value};

use super::AdminGraphql;
use crate::error::AppResult;

/// Admin GraphQL endpoint of one shop, authenticated with the access
/// token granted at install time.
pub struct AdminClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl AdminClient {
    pub fn new(
        http: reqwest::Client,
        shop: &str,
        access_token: String,
        api_version: &str,
    ) -> Self {
        Self {
            http,
            endpoint: format!("https://{}/admin/api/{}/graphql.json", shop, api_version),
            access_token,
        }
    }
}

#[async_trait]
impl AdminGraphql for AdminClient {
    async fn execute(&self, query: &str, variables: Value) -> AppResult<Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
