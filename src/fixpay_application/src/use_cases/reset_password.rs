use chrono::Utc;
use fixpay_core::{
    AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError, Email, OtpCode,
    OtpPurpose, Password,
};

/// Error types for the reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    /// Covers both an unknown account and a missing challenge, so the
    /// route leaks nothing about which it was.
    #[error("the otp is invalid or expired")]
    InvalidOrExpiredOtp,
    #[error("the otp is expired")]
    OtpExpired,
    #[error("the otp was issued for another purpose")]
    WrongOtpPurpose,
    #[error("the otp is invalid")]
    InvalidOtp,
    #[error("the new password must differ from the current one")]
    PasswordUnchanged,
    #[error("Hashing error: {0}")]
    HasherError(#[from] CredentialHasherError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Reset password use case - consumes the reset OTP and swaps the password
/// hash in one atomic document write.
pub struct ResetPasswordUseCase<A, H>
where
    A: AccountStore,
    H: CredentialHasher,
{
    account_store: A,
    hasher: H,
}

impl<A, H> ResetPasswordUseCase<A, H>
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

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        code: OtpCode,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let mut account = match self.account_store.find_by_email(&email).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => {
                return Err(ResetPasswordError::InvalidOrExpiredOtp)
            }
            Err(e) => return Err(ResetPasswordError::AccountStoreError(e)),
        };

        let Some(challenge) = account.reset_otp().cloned() else {
            return Err(ResetPasswordError::InvalidOrExpiredOtp);
        };

        if challenge.is_expired(Utc::now()) {
            return Err(ResetPasswordError::OtpExpired);
        }

        if challenge.purpose != OtpPurpose::ResetPassword {
            return Err(ResetPasswordError::WrongOtpPurpose);
        }

        if !self
            .hasher
            .verify(code.as_ref().clone(), &challenge.code_hash)
            .await?
        {
            return Err(ResetPasswordError::InvalidOtp);
        }

        // Identical passwords are rejected on purpose: the new plaintext is
        // checked against the stored hash before anything is written.
        if self
            .hasher
            .verify(new_password.as_ref().clone(), account.password_hash())
            .await?
        {
            return Err(ResetPasswordError::PasswordUnchanged);
        }

        let new_hash = self.hasher.hash(new_password.as_ref().clone()).await?;
        account.complete_password_reset(new_hash);

        self.account_store
            .update(&account)
            .await
            .map_err(ResetPasswordError::AccountStoreError)?;

        Ok(())
    }
}
