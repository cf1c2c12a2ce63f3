//! Shop install registry and embedded-app session claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One installed shop and the offline Admin API token granted to the
/// app during install.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Shop {
    pub shop: String,
    pub access_token: String,
    pub installed_at: DateTime<Utc>,
}

/// Claims carried by a Shopify embedded-app session token.
///
/// The token is signed by Shopify with the app's API secret; `aud` holds
/// the app's API key and `dest` the shop the request acts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub dest: String,
    pub aud: String,
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    /// Create a signed session token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse a session token, verifying the signature and the audience
    pub fn from_token(
        token: &str,
        secret: &str,
        api_key: &str,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[api_key]);
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }

    /// Shop domain named by the `dest` claim, without the scheme
    pub fn shop_domain(&self) -> &str {
        self.dest.strip_prefix("https://").unwrap_or(&self.dest)
    }
}
