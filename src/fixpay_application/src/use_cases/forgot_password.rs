use chrono::Utc;
use fixpay_core::{
    AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, Email, Notification,
    Notifier, OtpChallenge, OtpCode, OtpPurpose,
};

/// Error types for the forgot password use case. An unknown email is NOT an
/// error: the flow reports success either way to keep accounts
/// un-enumerable.
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("the email is not verified")]
    EmailNotVerified,
    #[error("a code was sent recently, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: i64 },
    #[error("Hashing error: {0}")]
    HasherError(#[from] CredentialHasherError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Forgot password use case - issues (or reissues) the password-reset OTP.
/// Serves both the initial request and the resend route.
pub struct ForgotPasswordUseCase<A, H, N>
where
    A: AccountStore,
    H: CredentialHasher,
    N: Notifier,
{
    account_store: A,
    hasher: H,
    notifier: N,
}

impl<A, H, N> ForgotPasswordUseCase<A, H, N>
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

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), ForgotPasswordError> {
        let mut account = match self.account_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                // Same success shape as the found case: no OTP, no mail.
                tracing::debug!("password reset requested for an unknown email");
                return Ok(());
            }
            Err(e) => return Err(ForgotPasswordError::AccountStoreError(e)),
        };

        if !account.is_verified() {
            return Err(ForgotPasswordError::EmailNotVerified);
        }

        let now = Utc::now();
        if let Some(challenge) = account.reset_otp() {
            if let Some(retry_after_secs) = challenge.resend_cooldown_remaining(now) {
                return Err(ForgotPasswordError::RateLimited { retry_after_secs });
            }
        }

        let code = OtpCode::generate();
        let code_hash = self.hasher.hash(code.as_ref().clone()).await?;
        account.start_password_reset(OtpChallenge::new(OtpPurpose::ResetPassword, code_hash, now));

        self.account_store
            .update(&account)
            .await
            .map_err(ForgotPasswordError::AccountStoreError)?;

        self.notifier.notify(Notification::ResetPasswordOtp {
            email: account.email().clone(),
            code,
        });

        Ok(())
    }
}
