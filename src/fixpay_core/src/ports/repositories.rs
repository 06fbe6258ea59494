use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, AccountId},
    email::Email,
    identity::{NationalId, PhoneNumber, Username},
};

/// Identity field that collided with an existing account, named the way
/// the API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Username,
    Phone,
    NationalId,
}

impl DuplicateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "userName",
            Self::Phone => "phoneNumber",
            Self::NationalId => "nationalId",
        }
    }
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identity fields of a prospective account, checked together
/// before insert.
#[derive(Debug, Clone, Copy)]
pub struct UniqueIdentity<'a> {
    pub email: &'a Email,
    pub username: &'a Username,
    pub phone: &'a PhoneNumber,
    pub national_id: Option<&'a NationalId>,
}

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("The {0} is already signed")]
    Duplicate(DuplicateField),
    #[error("Account not found")]
    AccountNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Duplicate(a), Self::Duplicate(b)) => a == b,
            (Self::AccountNotFound, Self::AccountNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Document store holding one record per account. Writes replace the
/// whole document atomically.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: Account) -> Result<(), AccountStoreError>;
    /// Whole-document replace keyed by the account id.
    async fn update(&self, account: &Account) -> Result<(), AccountStoreError>;
    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;
    async fn list(&self) -> Result<Vec<Account>, AccountStoreError>;
    /// Combined existence check over every unique identity field. Returns
    /// the first collision in field order, if any.
    async fn find_conflict(
        &self,
        identity: UniqueIdentity<'_>,
    ) -> Result<Option<DuplicateField>, AccountStoreError>;
}

#[async_trait]
impl<T: AccountStore + ?Sized> AccountStore for Arc<T> {
    async fn insert(&self, account: Account) -> Result<(), AccountStoreError> {
        (**self).insert(account).await
    }

    async fn update(&self, account: &Account) -> Result<(), AccountStoreError> {
        (**self).update(account).await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        (**self).find_by_email(email).await
    }

    async fn list(&self) -> Result<Vec<Account>, AccountStoreError> {
        (**self).list().await
    }

    async fn find_conflict(
        &self,
        identity: UniqueIdentity<'_>,
    ) -> Result<Option<DuplicateField>, AccountStoreError> {
        (**self).find_conflict(identity).await
    }
}

// RevokedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RevokedTokenStoreError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl PartialEq for RevokedTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::StorageError(_), Self::StorageError(_)) => true,
        }
    }
}

/// Session-token revocation list, keyed by the token's jti claim.
#[async_trait]
pub trait RevokedTokenStore: Send + Sync {
    /// Marks a token id as revoked for at least `ttl`; revoking it again
    /// is harmless.
    async fn revoke(&self, token_id: String, ttl: Duration) -> Result<(), RevokedTokenStoreError>;
    async fn is_revoked(&self, token_id: &str) -> Result<bool, RevokedTokenStoreError>;
}

#[async_trait]
impl<T: RevokedTokenStore + ?Sized> RevokedTokenStore for Arc<T> {
    async fn revoke(&self, token_id: String, ttl: Duration) -> Result<(), RevokedTokenStoreError> {
        (**self).revoke(token_id, ttl).await
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, RevokedTokenStoreError> {
        (**self).is_revoked(token_id).await
    }
}
