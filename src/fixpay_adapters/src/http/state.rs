use std::sync::Arc;

use fixpay_core::{AccountStore, CredentialHasher, Notifier, ObjectStorage, RevokedTokenStore};

use crate::auth::SessionTokenConfig;

/// Everything the route handlers need, cloned per request. Store types are
/// generic so the API tests run on the in-memory adapters.
pub struct AppState<A, R>
where
    A: AccountStore + Clone,
    R: RevokedTokenStore + Clone,
{
    pub accounts: A,
    pub revoked_tokens: R,
    pub hasher: Arc<dyn CredentialHasher>,
    pub notifier: Arc<dyn Notifier>,
    pub storage: Arc<dyn ObjectStorage>,
    pub token_config: SessionTokenConfig,
}

impl<A, R> Clone for AppState<A, R>
where
    A: AccountStore + Clone,
    R: RevokedTokenStore + Clone,
{
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            revoked_tokens: self.revoked_tokens.clone(),
            hasher: self.hasher.clone(),
            notifier: self.notifier.clone(),
            storage: self.storage.clone(),
            token_config: self.token_config.clone(),
        }
    }
}
