use chrono::Utc;
use fixpay_core::{
    AccountId, AccountProjection, AccountStore, AccountStoreError, CredentialHasher,
    CredentialHasherError, OtpCode, OtpPurpose,
};

/// Error types for the confirm email use case. Each failure is distinct so
/// the caller can tell an expired code from a wrong one.
#[derive(Debug, thiserror::Error)]
pub enum ConfirmEmailError {
    #[error("Account not found")]
    NotFound,
    #[error("the email is already verified")]
    AlreadyVerified,
    #[error("the otp is expired")]
    OtpExpired,
    #[error("the otp was issued for another purpose")]
    WrongOtpPurpose,
    #[error("the otp is invalid")]
    InvalidOtp,
    #[error("Hashing error: {0}")]
    HasherError(#[from] CredentialHasherError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Confirm email use case - consumes the registration OTP and marks the
/// account verified.
pub struct ConfirmEmailUseCase<A, H>
where
    A: AccountStore,
    H: CredentialHasher,
{
    account_store: A,
    hasher: H,
}

impl<A, H> ConfirmEmailUseCase<A, H>
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

    #[tracing::instrument(name = "ConfirmEmailUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        code: OtpCode,
    ) -> Result<AccountProjection, ConfirmEmailError> {
        let mut account = match self.account_store.find_by_id(&account_id).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => return Err(ConfirmEmailError::NotFound),
            Err(e) => return Err(ConfirmEmailError::AccountStoreError(e)),
        };

        if account.is_verified() {
            return Err(ConfirmEmailError::AlreadyVerified);
        }

        let now = Utc::now();
        let challenge = match account.confirmation_otp() {
            Some(challenge) if !challenge.is_expired(now) => challenge.clone(),
            _ => return Err(ConfirmEmailError::OtpExpired),
        };

        if challenge.purpose != OtpPurpose::ConfirmEmail {
            return Err(ConfirmEmailError::WrongOtpPurpose);
        }

        if !self
            .hasher
            .verify(code.as_ref().clone(), &challenge.code_hash)
            .await?
        {
            return Err(ConfirmEmailError::InvalidOtp);
        }

        // One document write covers the verification timestamp and the
        // cleared challenge, so a used code is never left valid for replay.
        account.confirm_email(now);
        self.account_store
            .update(&account)
            .await
            .map_err(ConfirmEmailError::AccountStoreError)?;

        Ok(AccountProjection::from(&account))
    }
}
