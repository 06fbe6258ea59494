use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const USERNAME_MIN_LENGTH: usize = 5;
pub const USERNAME_MAX_LENGTH: usize = 32;
pub const NATIONAL_ID_MIN_DIGITS: usize = 9;
pub const NATIONAL_ID_MAX_DIGITS: usize = 14;

// Egyptian mobile numbers: an optional +20 / 0020 / 20 / 0 prefix, then an
// operator prefix (10/11/12/15) and eight more digits.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?20|0020|0)?(1[0125][0-9]{8})$").expect("phone pattern compiles")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username must be from 5 to 32 chars")]
    InvalidLength,
}

/// Public handle shown to other users. Unique per account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
            return Err(UsernameError::InvalidLength);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("phone number must be a valid Egyptian mobile number")]
    InvalidNumber,
}

/// Mobile number canonicalized to the local `0`-prefixed form, so
/// `+20 101 234 5678`, `0020 101 234 5678` and `0101-234-5678` all store as
/// `01012345678` and collide on the uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        let captures = PHONE_PATTERN
            .captures(&compact)
            .ok_or(PhoneNumberError::InvalidNumber)?;
        // Whichever prefix was supplied, the stored form is the local one.
        Ok(Self(format!("0{}", &captures[2])))
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NationalIdError {
    #[error("national id must be between 9 and 14 digits")]
    InvalidFormat,
}

/// Government-issued id. Optional in general, required for workers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NationalId {
    type Error = NationalIdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let trimmed = raw.trim();
        let length = trimmed.len();
        if !(NATIONAL_ID_MIN_DIGITS..=NATIONAL_ID_MAX_DIGITS).contains(&length)
            || !trimmed.chars().all(|c| c.is_ascii_digit())
        {
            return Err(NationalIdError::InvalidFormat);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<NationalId> for String {
    fn from(national_id: NationalId) -> Self {
        national_id.0
    }
}
