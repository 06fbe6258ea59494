use std::time::Duration;

use fixpay_core::{RevokedTokenStore, RevokedTokenStoreError};

/// Error types for the logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Revoked token store error: {0}")]
    RevokedTokenStoreError(#[from] RevokedTokenStoreError),
}

/// Logout use case - puts the session token's id on the revocation list.
/// The token itself is never stored, only its jti claim.
pub struct LogoutUseCase<R>
where
    R: RevokedTokenStore,
{
    revoked_tokens: R,
}

impl<R> LogoutUseCase<R>
where
    R: RevokedTokenStore,
{
    pub fn new(revoked_tokens: R) -> Self {
        Self { revoked_tokens }
    }

    /// Execute the logout use case
    ///
    /// # Arguments
    /// * `token_id` - The jti claim of the session token to revoke
    /// * `remaining_ttl` - How long the token would otherwise stay valid
    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        token_id: String,
        remaining_ttl: Duration,
    ) -> Result<(), LogoutError> {
        self.revoked_tokens.revoke(token_id, remaining_ttl).await?;
        Ok(())
    }
}
