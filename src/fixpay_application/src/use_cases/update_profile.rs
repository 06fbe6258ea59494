use fixpay_core::{
    AccountId, AccountProjection, AccountStore, AccountStoreError, ProfilePatch, Role,
};

/// Error types for the update profile use case
#[derive(Debug, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("you may only edit your own profile")]
    Forbidden,
    #[error("Account not found")]
    NotFound,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Update profile use case - writes the editable profile fields. Unique
/// identity fields and lifecycle state are not reachable from here.
pub struct UpdateProfileUseCase<A>
where
    A: AccountStore,
{
    account_store: A,
}

impl<A> UpdateProfileUseCase<A>
where
    A: AccountStore,
{
    pub fn new(account_store: A) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self, patch))]
    pub async fn execute(
        &self,
        caller_id: AccountId,
        caller_role: Role,
        target_id: AccountId,
        patch: ProfilePatch,
    ) -> Result<AccountProjection, UpdateProfileError> {
        if caller_id != target_id && caller_role != Role::Admin {
            return Err(UpdateProfileError::Forbidden);
        }

        let mut account = match self.account_store.find_by_id(&target_id).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => return Err(UpdateProfileError::NotFound),
            Err(e) => return Err(UpdateProfileError::AccountStoreError(e)),
        };

        if !patch.is_empty() {
            account.apply_profile_patch(patch);
            self.account_store
                .update(&account)
                .await
                .map_err(UpdateProfileError::AccountStoreError)?;
        }

        Ok(AccountProjection::from(&account))
    }
}
