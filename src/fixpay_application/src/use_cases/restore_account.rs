use chrono::Utc;
use fixpay_core::{
    AccountProjection, AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError,
    Email, Password,
};

/// Error types for the restore account use case
#[derive(Debug, thiserror::Error)]
pub enum RestoreAccountError {
    #[error("email and password doesn't match")]
    InvalidCredentials,
    #[error("the account is not deleted")]
    NotDeleted,
    #[error("the restore window has passed, the account cannot be recovered")]
    RestoreWindowExpired,
    #[error("Hashing error: {0}")]
    HasherError(#[from] CredentialHasherError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Restore account use case - explicit recovery of a soft-deleted account.
/// Authenticates with email and password because the caller's session was
/// revoked when the account was deleted.
pub struct RestoreAccountUseCase<A, H>
where
    A: AccountStore,
    H: CredentialHasher,
{
    account_store: A,
    hasher: H,
}

impl<A, H> RestoreAccountUseCase<A, H>
where
    A: AccountStore,
    H: CredentialHasher,
{
    pub fn new(account_store: A, hasher: H) -> Self {
        Self {
            account_store,
            hasher,
        }
    }

    /// Execute the restore account use case
    ///
    /// # Returns
    /// The restored account's own projection
    #[tracing::instrument(name = "RestoreAccountUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AccountProjection, RestoreAccountError> {
        let mut account = match self.account_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                return Err(RestoreAccountError::InvalidCredentials)
            }
            Err(e) => return Err(RestoreAccountError::AccountStoreError(e)),
        };

        if !self
            .hasher
            .verify(password.as_ref().clone(), account.password_hash())
            .await?
        {
            return Err(RestoreAccountError::InvalidCredentials);
        }

        let Some(deletion) = account.deletion().copied() else {
            return Err(RestoreAccountError::NotDeleted);
        };

        if !deletion.is_restorable(Utc::now()) {
            return Err(RestoreAccountError::RestoreWindowExpired);
        }

        account.restore();
        self.account_store
            .update(&account)
            .await
            .map_err(RestoreAccountError::AccountStoreError)?;

        Ok(AccountProjection::from(&account))
    }
}
