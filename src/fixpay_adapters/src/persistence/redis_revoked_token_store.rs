use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fixpay_core::{RevokedTokenStore, RevokedTokenStoreError};
use redis::{Commands, Connection};
use tokio::sync::Mutex;

/// Revocation list on Redis. Each entry carries the revoked token's
/// remaining lifetime as its TTL, so Redis expires entries exactly when
/// the token itself would have expired.
#[derive(Clone)]
pub struct RedisRevokedTokenStore {
    conn: Arc<Mutex<Connection>>,
}

impl RedisRevokedTokenStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RevokedTokenStore for RedisRevokedTokenStore {
    #[tracing::instrument(name = "Revoking token in Redis", skip_all)]
    async fn revoke(&self, token_id: String, ttl: Duration) -> Result<(), RevokedTokenStoreError> {
        let key = get_key(&token_id);
        // SETEX rejects a zero expiry, and an already-dead token still
        // deserves a brief entry against clock skew.
        let ttl_seconds = ttl.as_secs().max(1);

        let mut conn = self.conn.lock().await;
        conn.set_ex(key, true, ttl_seconds)
            .map_err(|e| RevokedTokenStoreError::StorageError(e.to_string()))
    }

    #[tracing::instrument(name = "Checking token revocation in Redis", skip_all)]
    async fn is_revoked(&self, token_id: &str) -> Result<bool, RevokedTokenStoreError> {
        let key = get_key(token_id);
        let mut conn = self.conn.lock().await;
        conn.exists(&key)
            .map_err(|e| RevokedTokenStoreError::StorageError(e.to_string()))
    }
}

// Key prefix to prevent collisions with anything else in the instance.
const REVOKED_TOKEN_KEY_PREFIX: &str = "revoked_token:";

fn get_key(token_id: &str) -> String {
    format!("{}{}", REVOKED_TOKEN_KEY_PREFIX, token_id)
}
