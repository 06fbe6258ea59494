use std::time::Duration;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;
use fixpay_core::{Account, RevokedTokenStore, Role};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Lowercase on purpose: the check is case-sensitive and `Bearer ` is
/// rejected, matching the documented original middleware behavior.
pub const BEARER_PREFIX: &str = "bearer ";

#[derive(Clone)]
pub struct SessionTokenConfig {
    pub jwt_secret: Secret<String>,
    pub ttl_seconds: i64,
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("The token is required")]
    MissingToken,
    #[error("The token is invalid")]
    InvalidToken,
    /// Structurally valid and unexpired, but revoked by logout.
    #[error("your session is ended")]
    SessionEnded,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Claims carried by a session token. `jti` is unique per issuance and is
/// the only thing the revocation list ever stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub jti: String,
    pub exp: usize,
}

impl SessionClaims {
    /// How long the token would stay valid if it were not revoked. Used as
    /// the revocation-list TTL so entries die with their parent token.
    pub fn remaining_ttl(&self) -> Duration {
        let remaining = self.exp as i64 - Utc::now().timestamp();
        Duration::from_secs(remaining.max(0) as u64)
    }
}

pub fn issue_session_token(
    account: &Account,
    config: &SessionTokenConfig,
) -> Result<String, TokenAuthError> {
    let exp = Utc::now()
        .checked_add_signed(chrono::Duration::seconds(config.ttl_seconds))
        .ok_or_else(|| TokenAuthError::UnexpectedError("token expiry out of range".to_string()))?
        .timestamp();
    let exp: usize = exp
        .try_into()
        .map_err(|_| TokenAuthError::UnexpectedError("token expiry out of range".to_string()))?;

    let claims = SessionClaims {
        sub: account.id().to_string(),
        email: account.email().as_ref().expose_secret().clone(),
        role: account.role(),
        jti: Uuid::new_v4().to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
    )
    .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))
}

/// Signature and expiry check only; revocation is `authenticate`'s job.
pub fn decode_session_claims(
    token: &str,
    config: &SessionTokenConfig,
) -> Result<SessionClaims, TokenAuthError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| TokenAuthError::InvalidToken)
}

/// Full bearer authentication for a request: header shape, signature,
/// expiry, then the revocation list.
pub async fn authenticate<R: RevokedTokenStore>(
    headers: &HeaderMap,
    revoked_tokens: &R,
    config: &SessionTokenConfig,
) -> Result<SessionClaims, TokenAuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(TokenAuthError::MissingToken)?
        .to_str()
        .map_err(|_| TokenAuthError::InvalidToken)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenAuthError::InvalidToken)?;
    if token.is_empty() {
        return Err(TokenAuthError::InvalidToken);
    }

    let claims = decode_session_claims(token, config)?;

    let is_revoked = revoked_tokens
        .is_revoked(&claims.jti)
        .await
        .map_err(|e| TokenAuthError::UnexpectedError(e.to_string()))?;
    if is_revoked {
        return Err(TokenAuthError::SessionEnded);
    }

    Ok(claims)
}
