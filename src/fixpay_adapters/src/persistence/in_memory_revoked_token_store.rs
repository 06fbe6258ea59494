use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use fixpay_core::{RevokedTokenStore, RevokedTokenStoreError};
use tokio::sync::RwLock;

/// Revocation list backed by a map of token id to expiry instant. Entries
/// past their TTL simply stop matching; nothing prunes them.
#[derive(Clone, Default)]
pub struct InMemoryRevokedTokenStore {
    revoked: Arc<RwLock<HashMap<String, Instant>>>,
}

impl InMemoryRevokedTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevokedTokenStore for InMemoryRevokedTokenStore {
    async fn revoke(&self, token_id: String, ttl: Duration) -> Result<(), RevokedTokenStoreError> {
        self.revoked
            .write()
            .await
            .insert(token_id, Instant::now() + ttl);
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, RevokedTokenStoreError> {
        let revoked = self.revoked.read().await;
        Ok(revoked
            .get(token_id)
            .is_some_and(|expires_at| *expires_at > Instant::now()))
    }
}
