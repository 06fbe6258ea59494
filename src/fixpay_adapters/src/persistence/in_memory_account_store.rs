use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use fixpay_core::{
    Account, AccountId, AccountStore, AccountStoreError, DuplicateField, Email, UniqueIdentity,
};
use tokio::sync::RwLock;

/// Account store backed by a shared map. Used in development mode and by
/// the API test suite.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test hook: mutate a stored account in place, e.g. to age an OTP
    /// challenge past its cooldown or expiry.
    pub async fn with_account<F>(&self, id: &AccountId, mutate: F)
    where
        F: FnOnce(&mut Account),
    {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(id) {
            mutate(account);
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<(), AccountStoreError> {
        let identity = UniqueIdentity {
            email: account.email(),
            username: account.username(),
            phone: account.phone(),
            national_id: account.national_id(),
        };
        if let Some(field) = self.find_conflict(identity).await? {
            return Err(AccountStoreError::Duplicate(field));
        }

        self.accounts.write().await.insert(account.id(), account);
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&account.id()) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(AccountStoreError::AccountNotFound),
        }
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.accounts
            .read()
            .await
            .values()
            .find(|account| account.email() == email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn list(&self) -> Result<Vec<Account>, AccountStoreError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by_key(|account| account.created_at());
        Ok(accounts)
    }

    async fn find_conflict(
        &self,
        identity: UniqueIdentity<'_>,
    ) -> Result<Option<DuplicateField>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        for account in accounts.values() {
            if account.email() == identity.email {
                return Ok(Some(DuplicateField::Email));
            }
            if account.username() == identity.username {
                return Ok(Some(DuplicateField::Username));
            }
            if account.phone() == identity.phone {
                return Ok(Some(DuplicateField::Phone));
            }
            if account.national_id().is_some() && account.national_id() == identity.national_id {
                return Ok(Some(DuplicateField::NationalId));
            }
        }
        Ok(None)
    }
}
