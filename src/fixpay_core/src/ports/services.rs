use std::sync::Arc;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{email::Email, otp::OtpCode};

#[derive(Debug, Error)]
pub enum CredentialHasherError {
    #[error("Hashing error: {0}")]
    HashingError(String),
}

/// One-way, salted credential hashing. Used identically for passwords and
/// OTP codes.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, plaintext: Secret<String>)
        -> Result<Secret<String>, CredentialHasherError>;

    /// Returns false on a plain mismatch; Err is reserved for malformed
    /// hashes and runtime failures.
    async fn verify(
        &self,
        plaintext: Secret<String>,
        hash: &Secret<String>,
    ) -> Result<bool, CredentialHasherError>;
}

#[async_trait]
impl<T: CredentialHasher + ?Sized> CredentialHasher for Arc<T> {
    async fn hash(
        &self,
        plaintext: Secret<String>,
    ) -> Result<Secret<String>, CredentialHasherError> {
        (**self).hash(plaintext).await
    }

    async fn verify(
        &self,
        plaintext: Secret<String>,
        hash: &Secret<String>,
    ) -> Result<bool, CredentialHasherError> {
        (**self).verify(plaintext, hash).await
    }
}

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[async_trait]
impl<T: EmailClient + ?Sized> EmailClient for Arc<T> {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        (**self).send_email(recipient, subject, content).await
    }
}

/// Outbound message the lifecycle engine wants delivered to a user.
#[derive(Debug, Clone)]
pub enum Notification {
    ConfirmationOtp { email: Email, code: OtpCode },
    ResetPasswordOtp { email: Email, code: OtpCode },
}

impl Notification {
    pub fn email(&self) -> &Email {
        match self {
            Self::ConfirmationOtp { email, .. } => email,
            Self::ResetPasswordOtp { email, .. } => email,
        }
    }

    pub fn code(&self) -> &OtpCode {
        match self {
            Self::ConfirmationOtp { code, .. } => code,
            Self::ResetPasswordOtp { code, .. } => code,
        }
    }
}

/// Fire-and-forget dispatch. Implementations must not block the caller and
/// must swallow delivery failures; a lost notification is recovered through
/// the resend endpoints.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

#[derive(Debug, Error)]
pub enum ObjectStorageError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Reference to a stored object, as served back to clients.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub url: String,
}

/// Blob storage for uploaded files (avatars).
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn store(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        filename: &str,
    ) -> Result<StoredObject, ObjectStorageError>;
}

#[async_trait]
impl<T: ObjectStorage + ?Sized> ObjectStorage for Arc<T> {
    async fn store(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        filename: &str,
    ) -> Result<StoredObject, ObjectStorageError> {
        (**self).store(bytes, folder, filename).await
    }
}
