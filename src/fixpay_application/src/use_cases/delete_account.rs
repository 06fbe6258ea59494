use std::time::Duration;

use chrono::Utc;
use fixpay_core::{
    AccountId, AccountStore, AccountStoreError, RevokedTokenStore, RevokedTokenStoreError,
};

/// Error types for the delete account use case
#[derive(Debug, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("Account not found")]
    NotFound,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
    #[error("Revoked token store error: {0}")]
    RevokedTokenStoreError(#[from] RevokedTokenStoreError),
}

/// Delete account use case - soft-deletes the caller's account and revokes
/// the session it was called with.
pub struct DeleteAccountUseCase<A, R>
where
    A: AccountStore,
    R: RevokedTokenStore,
{
    account_store: A,
    revoked_tokens: R,
}

impl<A, R> DeleteAccountUseCase<A, R>
where
    A: AccountStore,
    R: RevokedTokenStore,
{
    pub fn new(account_store: A, revoked_tokens: R) -> Self {
        Self {
            account_store,
            revoked_tokens,
        }
    }

    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        token_id: String,
        token_remaining_ttl: Duration,
    ) -> Result<(), DeleteAccountError> {
        let mut account = match self.account_store.find_by_id(&account_id).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => return Err(DeleteAccountError::NotFound),
            Err(e) => return Err(DeleteAccountError::AccountStoreError(e)),
        };

        // Deleting twice keeps the original window; schedule_deletion is a
        // no-op on an already-deleted account.
        account.schedule_deletion(Utc::now());
        self.account_store
            .update(&account)
            .await
            .map_err(DeleteAccountError::AccountStoreError)?;

        self.revoked_tokens
            .revoke(token_id, token_remaining_ttl)
            .await?;

        Ok(())
    }
}
