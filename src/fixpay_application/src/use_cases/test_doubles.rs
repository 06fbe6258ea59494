//! Shared in-memory doubles for use-case tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fixpay_core::{
    Account, AccountId, AccountStore, AccountStoreError, CredentialHasher, CredentialHasherError,
    DuplicateField, Email, FullName, Gender, NationalId, NewAccount, Notification, Notifier,
    OtpChallenge, OtpPurpose, PhoneNumber, RevokedTokenStore, RevokedTokenStoreError, Role,
    UniqueIdentity, Username,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct InMemoryAccounts {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &AccountId) -> Option<Account> {
        self.accounts.read().await.get(id).cloned()
    }

    pub async fn seed(&self, account: Account) {
        self.accounts.write().await.insert(account.id(), account);
    }

    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccounts {
    async fn insert(&self, account: Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        for existing in accounts.values() {
            if existing.email() == account.email() {
                return Err(AccountStoreError::Duplicate(DuplicateField::Email));
            }
        }
        accounts.insert(account.id(), account);
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(&account.id()) {
            return Err(AccountStoreError::AccountNotFound);
        }
        accounts.insert(account.id(), account.clone());
        Ok(())
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
        Ok(self.accounts.read().await.values().cloned().collect())
    }

    async fn find_conflict(
        &self,
        identity: UniqueIdentity<'_>,
    ) -> Result<Option<DuplicateField>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        if accounts.values().any(|a| a.email() == identity.email) {
            return Ok(Some(DuplicateField::Email));
        }
        if accounts.values().any(|a| a.username() == identity.username) {
            return Ok(Some(DuplicateField::Username));
        }
        if accounts.values().any(|a| a.phone() == identity.phone) {
            return Ok(Some(DuplicateField::Phone));
        }
        if let Some(national_id) = identity.national_id {
            if accounts
                .values()
                .any(|a| a.national_id() == Some(national_id))
            {
                return Ok(Some(DuplicateField::NationalId));
            }
        }
        Ok(None)
    }
}

/// Reversible stand-in for the argon2 hasher, so tests can assert against
/// known hashes without paying for real key derivation.
#[derive(Default, Clone)]
pub struct PlainHasher;

#[async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(
        &self,
        plaintext: Secret<String>,
    ) -> Result<Secret<String>, CredentialHasherError> {
        Ok(Secret::from(format!("hashed:{}", plaintext.expose_secret())))
    }

    async fn verify(
        &self,
        plaintext: Secret<String>,
        hash: &Secret<String>,
    ) -> Result<bool, CredentialHasherError> {
        Ok(hash.expose_secret() == &format!("hashed:{}", plaintext.expose_secret()))
    }
}

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_code(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|n| n.code().as_ref().expose_secret().clone())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

#[derive(Default, Clone)]
pub struct InMemoryRevokedTokens {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRevokedTokens {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevokedTokenStore for InMemoryRevokedTokens {
    async fn revoke(&self, token_id: String, _ttl: Duration) -> Result<(), RevokedTokenStoreError> {
        self.revoked.write().await.insert(token_id);
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, RevokedTokenStoreError> {
        Ok(self.revoked.read().await.contains(token_id))
    }
}

pub fn details(email: &str, username: &str, phone: &str) -> NewAccount {
    NewAccount {
        email: Email::try_from(email.to_string()).unwrap(),
        username: Username::try_from(username.to_string()).unwrap(),
        phone: PhoneNumber::try_from(phone.to_string()).unwrap(),
        national_id: None,
        name: FullName::new("Omar", "Khaled").unwrap(),
        date_of_birth: NaiveDate::from_ymd_opt(1998, 1, 15).unwrap(),
        gender: Gender::Male,
        address: None,
        role: Role::User,
    }
}

pub fn worker_details(email: &str, username: &str, phone: &str, national_id: &str) -> NewAccount {
    NewAccount {
        national_id: Some(NationalId::try_from(national_id.to_string()).unwrap()),
        role: Role::Worker,
        ..details(email, username, phone)
    }
}

/// Seeds an unverified account with a known password and a confirmation
/// challenge issued at `now`.
pub async fn seeded_account(
    store: &InMemoryAccounts,
    details: NewAccount,
    password: &str,
    code: &str,
    now: DateTime<Utc>,
) -> Account {
    let hasher = PlainHasher;
    let password_hash = hasher
        .hash(Secret::from(password.to_string()))
        .await
        .unwrap();
    let code_hash = hasher.hash(Secret::from(code.to_string())).await.unwrap();
    let challenge = OtpChallenge::new(OtpPurpose::ConfirmEmail, code_hash, now);
    let account = Account::create(details, password_hash, challenge, now);
    store.seed(account.clone()).await;
    account
}

/// Seeds a verified account, the state most flows start from.
pub async fn verified_account(
    store: &InMemoryAccounts,
    details: NewAccount,
    password: &str,
    now: DateTime<Utc>,
) -> Account {
    let mut account = seeded_account(store, details, password, "000000", now).await;
    account.confirm_email(now);
    store.seed(account.clone()).await;
    account
}
