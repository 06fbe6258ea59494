use fixpay_core::{
    AccountId, AccountProjection, AccountStore, AccountStoreError, ObjectStorage,
    ObjectStorageError,
};

/// Mime types the original upload filter accepted.
pub const ALLOWED_UPLOAD_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Error types for the upload avatar use case
#[derive(Debug, thiserror::Error)]
pub enum UploadAvatarError {
    #[error("Invalid file format")]
    InvalidFileFormat,
    #[error("the file exceeds the 10 MiB limit")]
    FileTooLarge,
    #[error("Account not found")]
    NotFound,
    #[error("Object storage error: {0}")]
    StorageError(#[from] ObjectStorageError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

/// Upload avatar use case - stores the uploaded file under the account's
/// folder and points the avatar field at it.
pub struct UploadAvatarUseCase<A, S>
where
    A: AccountStore,
    S: ObjectStorage,
{
    account_store: A,
    storage: S,
}

impl<A, S> UploadAvatarUseCase<A, S>
where
    A: AccountStore,
    S: ObjectStorage,
{
    pub fn new(account_store: A, storage: S) -> Self {
        Self {
            account_store,
            storage,
        }
    }

    #[tracing::instrument(name = "UploadAvatarUseCase::execute", skip(self, bytes))]
    pub async fn execute(
        &self,
        account_id: AccountId,
        bytes: Vec<u8>,
        content_type: &str,
        filename: &str,
    ) -> Result<AccountProjection, UploadAvatarError> {
        if !ALLOWED_UPLOAD_MIME_TYPES.contains(&content_type) {
            return Err(UploadAvatarError::InvalidFileFormat);
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadAvatarError::FileTooLarge);
        }

        let mut account = match self.account_store.find_by_id(&account_id).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => return Err(UploadAvatarError::NotFound),
            Err(e) => return Err(UploadAvatarError::AccountStoreError(e)),
        };

        let stored = self
            .storage
            .store(bytes, &account_id.to_string(), filename)
            .await?;

        account.set_avatar(stored.url);
        self.account_store
            .update(&account)
            .await
            .map_err(UploadAvatarError::AccountStoreError)?;

        Ok(AccountProjection::from(&account))
    }
}
