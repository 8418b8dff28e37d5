//! HS256 access tokens carrying only the user id.
//!
//! The role is not a claim. It is re-read from the user row on every request
//! so a role change applies to tokens already in circulation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    /// Seconds since the UNIX epoch.
    pub exp: u64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Seconds since the UNIX epoch.
    pub exp: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}

/// `sub` is the user id as a hyphenated UUID string.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: u64,
    exp: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn validation() -> Validation {
    let mut v = Validation::new(Algorithm::HS256);
    v.set_required_spec_claims(&["exp", "sub"]);
    v
}

pub fn issue_access_token(
    user_id: Uuid,
    secret: &str,
    ttl_secs: u64,
) -> Result<IssuedToken, AuthError> {
    let iat = unix_now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat,
        exp: iat + ttl_secs,
    };
    let key = EncodingKey::from_secret(secret.as_bytes());
    let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(AuthError::Signing)?;

    Ok(IssuedToken {
        token,
        exp: claims.exp,
    })
}

/// Checks signature and expiry (60s leeway), then parses the subject.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let Claims { sub, exp, .. } =
        jsonwebtoken::decode::<Claims>(token, &key, &validation())?.claims;
    let user_id = Uuid::parse_str(&sub).map_err(|_| AuthError::Malformed)?;

    Ok(TokenInfo { user_id, exp })
}
