//! Admin GraphQL documents and response shapes

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Error code the Admin API reports when the metaobject type has no
/// definition yet; the trigger for the lazy schema bootstrap.
pub const UNDEFINED_OBJECT_TYPE: &str = "UNDEFINED_OBJECT_TYPE";

// ---- Documents ----

pub const QUERY_METAOBJECT_BY_HANDLE: &str = r#"
query countdownByHandle($handle: String!, $type: String!) {
  metaobjectByHandle(handle: { handle: $handle, type: $type }) {
    id
  }
}"#;

pub const QUERY_METAOBJECT_DEFINITION: &str = r#"
query countdownDefinition($type: String!) {
  metaobjectDefinitionByType(type: $type) {
    id
  }
}"#;

pub const QUERY_SHOP_TIMEZONE: &str = r#"
query shopTimezone {
  shop {
    timezoneOffset
  }
}"#;

pub const MUTATION_CREATE_METAOBJECT: &str = r#"
mutation metaobjectCreate($metaobject: MetaobjectCreateInput!) {
  metaobjectCreate(metaobject: $metaobject) {
    metaobject {
      id
      handle
    }
    userErrors {
      field
      message
      code
    }
  }
}"#;

pub const MUTATION_UPDATE_METAOBJECT: &str = r#"
mutation metaobjectUpdate($id: ID!, $metaobject: MetaobjectUpdateInput!) {
  metaobjectUpdate(id: $id, metaobject: $metaobject) {
    metaobject {
      id
      handle
    }
    userErrors {
      field
      message
      code
    }
  }
}"#;

pub const MUTATION_DELETE_METAOBJECT: &str = r#"
mutation metaobjectDelete($id: ID!) {
  metaobjectDelete(id: $id) {
    deletedId
    userErrors {
      field
      message
      code
    }
  }
}"#;

pub const MUTATION_CREATE_DEFINITION: &str = r#"
mutation countdownDefinitionCreate($definition: MetaobjectDefinitionCreateInput!) {
  metaobjectDefinitionCreate(definition: $definition) {
    metaobjectDefinition {
      id
    }
    userErrors {
      field
      message
      code
    }
  }
}"#;

pub const MUTATION_DELETE_DEFINITION: &str = r#"
mutation countdownDefinitionDelete($id: ID!) {
  metaobjectDefinitionDelete(id: $id) {
    deletedId
    userErrors {
      field
      message
      code
    }
  }
}"#;

// ---- Response shapes ----

/// Per-field error reported by an Admin API operation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

/// Top-level error messages, reported when the API fails the request as
/// a whole (throttling, revoked access) instead of running the
/// operation. Distinct from the per-field `userErrors`.
pub fn request_errors(response: &Value) -> Vec<String> {
    response
        .get("errors")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(|raw| match raw.get("message").and_then(Value::as_str) {
                    Some(message) => message.to_string(),
                    None => raw.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Collect every user error under `data`, whatever operation produced
/// it. An empty result means the response is clean. An entry the API
/// shaped unexpectedly still counts as an error, carrying its raw JSON
/// as the message.
pub fn user_errors(response: &Value) -> Vec<UserError> {
    let mut errors = Vec::new();
    if let Some(data) = response.get("data").and_then(Value::as_object) {
        for operation in data.values() {
            if let Some(list) = operation.get("userErrors").and_then(Value::as_array) {
                for raw in list {
                    match serde_json::from_value(raw.clone()) {
                        Ok(error) => errors.push(error),
                        Err(reason) => {
                            tracing::warn!("Malformed user error entry {}: {}", raw, reason);
                            errors.push(UserError {
                                field: None,
                                message: format!("Malformed user error entry: {}", raw),
                                code: None,
                            });
                        }
                    }
                }
            }
        }
    }
    errors
}

pub fn has_undefined_type(errors: &[UserError]) -> bool {
    errors
        .iter()
        .any(|error| error.code.as_deref() == Some(UNDEFINED_OBJECT_TYPE))
}

// ---- Tests ----
