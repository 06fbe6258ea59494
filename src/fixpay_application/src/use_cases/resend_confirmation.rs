use chrono::Utc;
use fixpay_core::{
    AccountId, AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError,
    Notification, Notifier, OtpChallenge, OtpCode, OtpPurpose,
};

/// Error types for the resend confirmation use case
#[derive(Debug, thiserror::Error)]
pub enum ResendConfirmationError {
    #[error("Account not found")]
    NotFound,
    #[error("the email is already verified")]
    AlreadyVerified,
    #[error("a code was sent recently, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: i64 },
    #[error("Hashing error: {0}")]
    HasherError(#[from] CredentialHasherError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Resend confirmation use case - reissues the registration OTP, replacing
/// the previous challenge wholesale.
pub struct ResendConfirmationUseCase<A, H, N>
where
    A: AccountStore,
    H: CredentialHasher,
    N: Notifier,
{
    account_store: A,
    hasher: H,
    notifier: N,
}

impl<A, H, N> ResendConfirmationUseCase<A, H, N>
where
    A: AccountStore,
    H: CredentialHasher,
    N: Notifier,
{
    pub fn new(account_store: A, hasher: H, notifier: N) -> Self {
        Self {
            account_store,
            hasher,
            notifier,
        }
    }

    #[tracing::instrument(name = "ResendConfirmationUseCase::execute", skip(self))]
    pub async fn execute(&self, account_id: AccountId) -> Result<(), ResendConfirmationError> {
        let mut account = match self.account_store.find_by_id(&account_id).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                return Err(ResendConfirmationError::NotFound)
            }
            Err(e) => return Err(ResendConfirmationError::AccountStoreError(e)),
        };

        if account.is_verified() {
            return Err(ResendConfirmationError::AlreadyVerified);
        }

        let now = Utc::now();
        if let Some(challenge) = account.confirmation_otp() {
            if let Some(retry_after_secs) = challenge.resend_cooldown_remaining(now) {
                return Err(ResendConfirmationError::RateLimited { retry_after_secs });
            }
        }

        let code = OtpCode::generate();
        let code_hash = self.hasher.hash(code.as_ref().clone()).await?;
        account.start_confirmation(OtpChallenge::new(OtpPurpose::ConfirmEmail, code_hash, now));

        self.account_store
            .update(&account)
            .await
            .map_err(ResendConfirmationError::AccountStoreError)?;

        self.notifier.notify(Notification::ConfirmationOtp {
            email: account.email().clone(),
            code,
        });

        Ok(())
    }
}
