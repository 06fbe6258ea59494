use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password must be from 8 to 100 chars")]
    InvalidLength,
}

/// Plaintext password as received from a client. Only ever held in memory
/// on its way to the credential hasher.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        let length = raw.expose_secret().chars().count();
        if !(PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length) {
            return Err(PasswordError::InvalidLength);
        }
        Ok(Self(raw))
    }
}

impl TryFrom<String> for Password {
    type Error = PasswordError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::try_from(Secret::from(raw))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}
