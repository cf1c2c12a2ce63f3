//! Metaobject mirror of countdown configurations
//!
//! Each stored countdown is published into the shop's metaobject store
//! under the handle `countdown-<id>` so theme code can read it without
//! touching this server. The metaobject type definition is created
//! lazily the first time the Admin API reports it missing.

pub mod client;
pub mod graphql;

pub use client::AdminClient;

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::StoredCountdown;
use graphql::UserError;

/// Metaobject type tag owned by this app
pub const METAOBJECT_TYPE: &str = "countdowns";

/// Stamped into every mirror write so storefront readers can detect
/// schema drift. Metadata only, never branched on here.
pub const METAOBJECT_VERSION: &str = "1";

/// Deterministic metaobject handle for a countdown id
pub fn metaobject_handle(id: &str) -> String {
    format!("countdown-{}", id)
}

/// One GraphQL round trip against the Admin API. The production channel
/// is [`client::AdminClient`]; tests script this seam.
#[async_trait]
pub trait AdminGraphql: Send + Sync {
    /// Execute a request and return the full response body.
    async fn execute(&self, query: &str, variables: Value) -> AppResult<Value>;
}

/// Synchronizes countdowns into the shop's metaobject store.
pub struct ShopifyRepository {
    channel: Arc<dyn AdminGraphql>,
}

impl ShopifyRepository {
    pub fn new(channel: Arc<dyn AdminGraphql>) -> Self {
        Self { channel }
    }

    // ---- Request plumbing ----

    /// Issue a request, recovering once from a missing metaobject
    /// definition: create the definition and replay the request. The
    /// flag bounds the recovery to a single replay; a second
    /// undefined-type answer is surfaced like any other user error.
    async fn request(&self, query: &str, variables: Value) -> AppResult<Value> {
        let mut bootstrapped = false;
        loop {
            let response = Self::screened(self.channel.execute(query, variables.clone()).await?)?;
            let errors = graphql::user_errors(&response);

            if errors.is_empty() {
                return Ok(response);
            }

            if graphql::has_undefined_type(&errors) && !bootstrapped {
                tracing::info!("Metaobject definition missing, creating it before retrying");
                self.create_definition().await?;
                bootstrapped = true;
                continue;
            }

            return Err(Self::rejected(errors));
        }
    }

    /// Like [`Self::request`] but without the bootstrap recovery.
    /// Definition management itself runs through here, so a failing
    /// bootstrap can never re-enter itself.
    async fn request_once(&self, query: &str, variables: Value) -> AppResult<Value> {
        let response = Self::screened(self.channel.execute(query, variables).await?)?;
        let errors = graphql::user_errors(&response);

        if errors.is_empty() {
            return Ok(response);
        }
        Err(Self::rejected(errors))
    }

    /// Reject responses the API failed outright. With top-level errors
    /// (or no `data` object to read) no operation ran, so there are no
    /// user errors to consult and nothing to interpret as missing.
    fn screened(response: Value) -> AppResult<Value> {
        let errors = graphql::request_errors(&response);
        if !errors.is_empty() {
            for message in &errors {
                tracing::error!("Admin API error: {}", message);
            }
            return Err(AppError::AdminRequestFailed(errors.join("; ")));
        }
        if response.get("data").and_then(Value::as_object).is_none() {
            return Err(AppError::AdminRequestFailed(
                "response carried no data".to_string(),
            ));
        }
        Ok(response)
    }

    fn rejected(errors: Vec<UserError>) -> AppError {
        for error in &errors {
            tracing::error!("Admin API user error: {}", error);
        }
        AppError::UserErrorsFound { errors }
    }

    /// Remote id of the metaobject stored under `handle`. Only the
    /// explicit null lookup result is the recoverable `MissingMetaobject`
    /// condition that drives create-vs-update and delete-is-noop
    /// branching; any other shape is a failure.
    async fn metaobject_by_handle(&self, handle: &str) -> AppResult<String> {
        let response = self
            .request(
                graphql::QUERY_METAOBJECT_BY_HANDLE,
                json!({ "handle": handle, "type": METAOBJECT_TYPE }),
            )
            .await?;

        match response["data"].get("metaobjectByHandle") {
            Some(Value::Null) => Err(AppError::MissingMetaobject {
                handle: handle.to_string(),
            }),
            Some(node) => node["id"].as_str().map(String::from).ok_or_else(|| {
                AppError::Internal("Metaobject id missing from Admin API response".to_string())
            }),
            None => Err(AppError::Internal(
                "Metaobject lookup missing from Admin API response".to_string(),
            )),
        }
    }

    fn mirror_fields(countdown: &StoredCountdown) -> AppResult<Value> {
        let config = serde_json::to_string(countdown)
            .map_err(|e| AppError::Internal(format!("Failed to serialize countdown: {}", e)))?;

        Ok(json!([
            { "key": "config-id", "value": countdown.id },
            { "key": "version", "value": METAOBJECT_VERSION },
            { "key": "config", "value": config },
        ]))
    }

    // ---- Countdown mirror ----

    /// Publish a countdown: update the existing metaobject when the
    /// handle resolves, create a new one when it does not.
    pub async fn save(&self, countdown: &StoredCountdown) -> AppResult<()> {
        let handle = metaobject_handle(&countdown.id);
        let fields = Self::mirror_fields(countdown)?;

        match self.metaobject_by_handle(&handle).await {
            Ok(remote_id) => {
                self.request(
                    graphql::MUTATION_UPDATE_METAOBJECT,
                    json!({ "id": remote_id, "metaobject": { "fields": fields } }),
                )
                .await?;
                Ok(())
            }
            Err(AppError::MissingMetaobject { .. }) => {
                self.request(
                    graphql::MUTATION_CREATE_METAOBJECT,
                    json!({
                        "metaobject": {
                            "fields": fields,
                            "handle": handle,
                            "type": METAOBJECT_TYPE,
                        }
                    }),
                )
                .await?;
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Delete the mirror of a countdown. A handle that resolves to
    /// nothing means the mirror is already gone, which counts as
    /// success.
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let handle = metaobject_handle(id);

        match self.metaobject_by_handle(&handle).await {
            Ok(remote_id) => {
                self.request(graphql::MUTATION_DELETE_METAOBJECT, json!({ "id": remote_id }))
                    .await?;
                Ok(())
            }
            Err(AppError::MissingMetaobject { .. }) => Ok(()),
            Err(error) => Err(error),
        }
    }

    // ---- Definition lifecycle ----

    /// Declare the countdown metaobject type: three fields, public
    /// admin read/write. Existence is not pre-checked; a redefinition
    /// surfaces whatever the API reports.
    pub async fn create_definition(&self) -> AppResult<()> {
        self.request_once(
            graphql::MUTATION_CREATE_DEFINITION,
            json!({
                "definition": {
                    "name": "Shopify Countdown Configs",
                    "type": METAOBJECT_TYPE,
                    "access": { "admin": "PUBLIC_READ_WRITE" },
                    "fieldDefinitions": [
                        { "key": "config-id", "name": "ID", "type": "single_line_text_field" },
                        { "key": "version", "name": "Config Version", "type": "single_line_text_field" },
                        { "key": "config", "name": "Config", "type": "json" },
                    ]
                }
            }),
        )
        .await?;
        Ok(())
    }

    /// Id of the metaobject definition, `None` while it has not been
    /// created yet.
    pub async fn definition(&self) -> AppResult<Option<String>> {
        let response = self
            .request_once(
                graphql::QUERY_METAOBJECT_DEFINITION,
                json!({ "type": METAOBJECT_TYPE }),
            )
            .await?;

        Ok(response["data"]["metaobjectDefinitionByType"]["id"]
            .as_str()
            .map(String::from))
    }

    /// Delete the metaobject definition; an absent definition is
    /// already-removed success.
    pub async fn remove_definition(&self) -> AppResult<()> {
        match self.definition().await? {
            Some(id) => {
                self.request_once(graphql::MUTATION_DELETE_DEFINITION, json!({ "id": id }))
                    .await?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    // ---- Shop info ----

    /// The shop's UTC offset string, e.g. "-05:00". The admin UI uses
    /// it to render schedule times in shop-local time.
    pub async fn shop_timezone_offset(&self) -> AppResult<String> {
        let response = self.request(graphql::QUERY_SHOP_TIMEZONE, json!({})).await?;

        response["data"]["shop"]["timezoneOffset"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                AppError::Internal("Shop timezone missing from Admin API response".to_string())
            })
    }
}

// ---- Test double ----


// ---- Tests ----
