use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const EMAIL_MIN_LENGTH: usize = 5;
pub const EMAIL_MAX_LENGTH: usize = 100;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("you need to enter Email format !")]
    InvalidFormat,
    #[error("email must be from 5 to 100 chars")]
    InvalidLength,
}

/// Email address, trimmed and lowercased on parse. Doubles as the login
/// identifier, so it is kept behind `Secret` like other credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(Secret<String>);

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let normalized = raw.trim().to_lowercase();
        let length = normalized.chars().count();
        if !(EMAIL_MIN_LENGTH..=EMAIL_MAX_LENGTH).contains(&length) {
            return Err(EmailError::InvalidLength);
        }
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(EmailError::InvalidFormat);
        }
        Ok(Self(Secret::from(normalized)))
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        Self::try_from(raw.expose_secret().clone())
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0.expose_secret().clone()
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
