use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use fixpay_core::{ObjectStorage, ObjectStorageError, StoredObject};
use rand::{distr::Alphanumeric, Rng};

/// Object storage on the local filesystem, served back through the
/// static `/uploads` route.
pub struct LocalObjectStorage {
    root: PathBuf,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    #[tracing::instrument(name = "Storing uploaded object", skip(self, bytes))]
    async fn store(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        filename: &str,
    ) -> Result<StoredObject, ObjectStorageError> {
        let unique_name = unique_name(filename);

        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ObjectStorageError::StorageError(e.to_string()))?;

        let path = dir.join(&unique_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ObjectStorageError::StorageError(e.to_string()))?;

        Ok(StoredObject {
            url: format!("uploads/{folder}/{unique_name}"),
        })
    }
}

/// Prefixes the client filename with a timestamp and a random tag so two
/// uploads of the same file never collide.
fn unique_name(filename: &str) -> String {
    let tag: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!(
        "{}_{}_{}",
        Utc::now().timestamp_millis(),
        tag,
        sanitize(filename)
    )
}

/// Keeps the stored name path-safe: whitespace becomes underscores and
/// anything outside [A-Za-z0-9._-] is dropped.
fn sanitize(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
