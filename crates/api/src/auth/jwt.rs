//! JWT access-token generation/validation and the admin allowlist.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! Authorization is allowlist-based: a token is accepted for admin routes
//! only when its subject email appears in [`JwtConfig::admin_emails`].

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's email address.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Emails allowed to use admin routes.
    pub admin_emails: Vec<String>,
    /// Access token lifetime in minutes (default: 60).
    pub access_token_expiry_mins: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;

/// Default admin allowlist for local development.
const DEFAULT_ADMIN_EMAILS: &str = "admin@gamehub.com";

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default               |
    /// |--------------------------|----------|-----------------------|
    /// | `JWT_SECRET`             | **yes**  | --                    |
    /// | `ADMIN_EMAILS`           | no       | `admin@gamehub.com`   |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `60`                  |
    ///
    /// `ADMIN_EMAILS` is a comma-separated list.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let admin_emails: Vec<String> = std::env::var("ADMIN_EMAILS")
            .unwrap_or_else(|_| DEFAULT_ADMIN_EMAILS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            admin_emails,
            access_token_expiry_mins,
        }
    }

    /// Whether `email` is on the admin allowlist.
    pub fn is_admin(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|e| e == email)
    }
}

/// Generate an HS256 access token for the given email.
pub fn generate_access_token(
    email: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;

    let claims = Claims {
        sub: email.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
