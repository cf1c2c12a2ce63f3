//! API integration tests
//!
//! These run against a live server on localhost:8080 whose configured
//! Shopify credentials match SHOPIFY_API_KEY / SHOPIFY_API_SECRET, with
//! the test shop present in the install registry.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

use countdown_server::models::shop::SessionClaims;

const BASE_URL: &str = "http://localhost:8080/api/v1";
const TEST_SHOP: &str = "countdown-test.myshopify.com";

/// Mint a session token the way Shopify would for the embedded app
fn session_token() -> String {
    let api_key = std::env::var("SHOPIFY_API_KEY").unwrap_or_default();
    let api_secret = std::env::var("SHOPIFY_API_SECRET").unwrap_or_default();

    let now = Utc::now();
    let claims = SessionClaims {
        iss: format!("https://{}/admin", TEST_SHOP),
        dest: format!("https://{}", TEST_SHOP),
        aud: api_key,
        sub: "1".to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    claims.create_token(&api_secret).expect("Failed to sign session token")
}

fn sample_config(name: &str) -> Value {
    json!({
        "name": name,
        "finishAt": (Utc::now() + Duration::days(7)).to_rfc3339(),
        "mode": "simple"
    })
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/countdowns", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_list_countdowns() {
    let client = Client::new();
    let token = session_token();

    let response = client
        .get(format!("{}/countdowns", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_countdown() {
    let client = Client::new();
    let token = session_token();

    // Create countdown
    let response = client
        .post(format!("{}/countdowns", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&sample_config("Integration sale"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_str().expect("No countdown ID").to_string();
    assert_eq!(body["name"], "Integration sale");
    assert!(body["days"]["monday"]["enabled"].as_bool().unwrap());

    // Delete countdown
    let response = client
        .delete(format!("{}/countdowns/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_invalid_countdown_is_rejected() {
    let client = Client::new();
    let token = session_token();

    let response = client
        .post(format!("{}/countdowns", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&sample_config(""))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["issues"][0], "missing-name");
}

#[tokio::test]
#[ignore]
async fn test_setup_status() {
    let client = Client::new();
    let token = session_token();

    let response = client
        .get(format!("{}/setup", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["configured"].is_boolean());
}

#[tokio::test]
#[ignore]
async fn test_get_shop() {
    let client = Client::new();
    let token = session_token();

    let response = client
        .get(format!("{}/shop", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["shop"], TEST_SHOP);
    assert!(body["timezoneOffset"].is_string());
}
