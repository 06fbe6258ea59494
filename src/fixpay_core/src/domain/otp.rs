use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::serde_secret;

pub const OTP_LENGTH: usize = 6;
pub const CONFIRMATION_OTP_TTL_MINUTES: i64 = 10;
pub const RESET_OTP_TTL_MINUTES: i64 = 15;
pub const OTP_RESEND_COOLDOWN_SECONDS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    ConfirmEmail,
    ResetPassword,
}

impl OtpPurpose {
    pub fn ttl_minutes(self) -> i64 {
        match self {
            Self::ConfirmEmail => CONFIRMATION_OTP_TTL_MINUTES,
            Self::ResetPassword => RESET_OTP_TTL_MINUTES,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpCodeError {
    #[error("the code must be 6 digits")]
    InvalidFormat,
}

/// Plaintext one-time code. Only ever held in memory on its way to the
/// hasher and the notifier; stores see the hash alone.
#[derive(Debug, Clone)]
pub struct OtpCode(Secret<String>);

impl OtpCode {
    pub fn generate() -> Self {
        let code = rand::rng().random_range(0..=999_999u32);
        Self(Secret::from(format!("{code:06}")))
    }
}

impl TryFrom<Secret<String>> for OtpCode {
    type Error = OtpCodeError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        let code = raw.expose_secret().trim();
        if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpCodeError::InvalidFormat);
        }
        Ok(Self(Secret::from(code.to_string())))
    }
}

impl TryFrom<String> for OtpCode {
    type Error = OtpCodeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::try_from(Secret::from(raw))
    }
}

impl AsRef<Secret<String>> for OtpCode {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for OtpCode {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

/// One outstanding OTP, stored on the account itself. Reissuing replaces
/// the whole challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpChallenge {
    pub purpose: OtpPurpose,
    #[serde(with = "serde_secret")]
    pub code_hash: Secret<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn new(purpose: OtpPurpose, code_hash: Secret<String>, now: DateTime<Utc>) -> Self {
        Self {
            purpose,
            code_hash,
            created_at: now,
            expires_at: now + Duration::minutes(purpose.ttl_minutes()),
        }
    }

    /// A challenge stays valid through its exact expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Seconds the caller still has to wait before a new code may be
    /// issued, if the cooldown is running.
    pub fn resend_cooldown_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        if self.is_expired(now) {
            return None;
        }
        let elapsed = (now - self.created_at).num_seconds();
        let remaining = OTP_RESEND_COOLDOWN_SECONDS - elapsed;
        (remaining > 0).then_some(remaining)
    }
}
