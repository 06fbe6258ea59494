use chrono::Utc;
use fixpay_core::{
    Account, AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, Email,
    Password,
};

/// Error types for the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Deliberately covers both an unknown email and a wrong password.
    #[error("email and password doesn't match")]
    InvalidCredentials,
    #[error("the restore window has passed, the account cannot be recovered")]
    AccountUnrestorable,
    #[error("Hashing error: {0}")]
    HasherError(#[from] CredentialHasherError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Login use case - authenticates credentials and, for a soft-deleted
/// account still inside its restore window, restores it in the same flow.
pub struct LoginUseCase<A, H>
where
    A: AccountStore,
    H: CredentialHasher,
{
    account_store: A,
    hasher: H,
}

impl<A, H> LoginUseCase<A, H>
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

    /// Execute the login use case
    ///
    /// # Returns
    /// The authenticated (and possibly just-restored) account. Issuing the
    /// session token is the transport layer's job.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<Account, LoginError> {
        let mut account = match self.account_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => return Err(LoginError::InvalidCredentials),
            Err(e) => return Err(LoginError::AccountStoreError(e)),
        };

        if !self
            .hasher
            .verify(password.as_ref().clone(), account.password_hash())
            .await?
        {
            return Err(LoginError::InvalidCredentials);
        }

        if let Some(deletion) = account.deletion().copied() {
            if !deletion.is_restorable(Utc::now()) {
                return Err(LoginError::AccountUnrestorable);
            }
            account.restore();
            self.account_store
                .update(&account)
                .await
                .map_err(LoginError::AccountStoreError)?;
        }

        Ok(account)
    }
}
