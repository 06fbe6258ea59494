use chrono::Utc;
use fixpay_core::{
    Account, AccountProjection, AccountStore, AccountStoreError, CredentialHasher,
    CredentialHasherError, DuplicateField, NewAccount, Notification, Notifier, OtpChallenge,
    OtpCode, OtpPurpose, Password, Role, UniqueIdentity,
};

/// Error types for the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("The {0} is already signed")]
    Duplicate(DuplicateField),
    #[error("worker accounts must provide a national id")]
    NationalIdRequired,
    #[error("Hashing error: {0}")]
    HasherError(#[from] CredentialHasherError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

impl From<AccountStoreError> for RegisterError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::Duplicate(field) => Self::Duplicate(field),
            other => Self::AccountStoreError(other),
        }
    }
}

/// Register use case - creates an unverified account and issues its first
/// confirmation OTP.
pub struct RegisterUseCase<A, H, N>
where
    A: AccountStore,
    H: CredentialHasher,
    N: Notifier,
{
    account_store: A,
    hasher: H,
    notifier: N,
}

impl<A, H, N> RegisterUseCase<A, H, N>
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

    /// Execute the register use case
    ///
    /// # Returns
    /// The non-secret projection of the created account, or RegisterError
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        details: NewAccount,
        password: Password,
    ) -> Result<AccountProjection, RegisterError> {
        let identity = UniqueIdentity {
            email: &details.email,
            username: &details.username,
            phone: &details.phone,
            national_id: details.national_id.as_ref(),
        };
        if let Some(field) = self.account_store.find_conflict(identity).await? {
            return Err(RegisterError::Duplicate(field));
        }

        if details.role == Role::Worker && details.national_id.is_none() {
            return Err(RegisterError::NationalIdRequired);
        }

        let password_hash = self.hasher.hash(password.as_ref().clone()).await?;

        let code = OtpCode::generate();
        let code_hash = self.hasher.hash(code.as_ref().clone()).await?;
        let now = Utc::now();
        let challenge = OtpChallenge::new(OtpPurpose::ConfirmEmail, code_hash, now);

        let account = Account::create(details, password_hash, challenge, now);
        let email = account.email().clone();
        let projection = AccountProjection::from(&account);

        // The store's unique indexes backstop the conflict query under
        // concurrent registration.
        self.account_store.insert(account).await?;

        // Fire-and-forget: a lost email is recovered via the resend route,
        // never by rolling back the account.
        self.notifier
            .notify(Notification::ConfirmationOtp { email, code });

        Ok(projection)
    }
}
