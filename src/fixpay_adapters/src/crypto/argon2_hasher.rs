use argon2::{
    password_hash::{rand_core, PasswordHasher, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
};
use async_trait::async_trait;
use fixpay_core::{CredentialHasher, CredentialHasherError};
use secrecy::{ExposeSecret, Secret};

/// Argon2id hasher used for both passwords and OTP codes. Key derivation
/// runs on the blocking pool so it never stalls the request executor.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        // Same cost profile for passwords and the short-lived OTP codes.
        Self::with_params(15000, 2, 1)
    }

    /// Lighter parameters for tests; production callers use `new`.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Self {
        Self {
            params: Params::new(m_cost, t_cost, p_cost, None).expect("argon2 params are valid"),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing credential hash", skip_all)]
    async fn hash(
        &self,
        plaintext: Secret<String>,
    ) -> Result<Secret<String>, CredentialHasherError> {
        let hasher = self.argon2();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                hasher
                    .hash_password(plaintext.expose_secret().as_bytes(), &salt)
                    .map(|hash| Secret::from(hash.to_string()))
                    .map_err(|e| CredentialHasherError::HashingError(e.to_string()))
            })
        })
        .await
        .map_err(|e| CredentialHasherError::HashingError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying credential hash", skip_all)]
    async fn verify(
        &self,
        plaintext: Secret<String>,
        hash: &Secret<String>,
    ) -> Result<bool, CredentialHasherError> {
        let verifier = self.argon2();
        let expected = hash.clone();
        let current_span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let expected = PasswordHash::new(expected.expose_secret())
                    .map_err(|e| CredentialHasherError::HashingError(e.to_string()))?;

                match verifier.verify_password(plaintext.expose_secret().as_bytes(), &expected) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(CredentialHasherError::HashingError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| CredentialHasherError::HashingError(e.to_string()))?
    }
}
