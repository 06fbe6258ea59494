use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 32;

/// Wire format of the date of birth, e.g. `15-01-1998`.
pub const DATE_OF_BIRTH_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("first name must be from 2 to 32 chars")]
    InvalidFirst,
    #[error("last name must be from 2 to 32 chars")]
    InvalidLast,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName {
    first: String,
    last: String,
}

impl FullName {
    pub fn new(first: &str, last: &str) -> Result<Self, FullNameError> {
        let first = first.trim();
        let last = last.trim();
        if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&first.chars().count()) {
            return Err(FullNameError::InvalidFirst);
        }
        if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&last.chars().count()) {
            return Err(FullNameError::InvalidLast);
        }
        Ok(Self {
            first: first.to_string(),
            last: last.to_string(),
        })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }
}

/// Free-form postal address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub government: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
}

impl Address {
    pub fn new(
        government: Option<String>,
        city: Option<String>,
        street: Option<String>,
    ) -> Self {
        let trim = |part: Option<String>| {
            part.map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            government: trim(government),
            city: trim(city),
            street: trim(street),
        }
    }
}

/// Wire format is a bool: false = male, true = female.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Gender {
    Male,
    Female,
}

impl From<bool> for Gender {
    fn from(value: bool) -> Self {
        if value { Self::Female } else { Self::Male }
    }
}

impl From<Gender> for bool {
    fn from(gender: Gender) -> Self {
        matches!(gender, Gender::Female)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("role must be one of: user, worker, admin")]
pub struct RoleError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Worker,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Worker => "worker",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "user" => Ok(Self::User),
            "worker" => Ok(Self::Worker),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleError),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateOfBirthError {
    #[error(r#"you need to enter date in form "dd-mm-yyyy""#)]
    InvalidFormat,
}

pub fn parse_date_of_birth(raw: &str) -> Result<NaiveDate, DateOfBirthError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_OF_BIRTH_FORMAT)
        .map_err(|_| DateOfBirthError::InvalidFormat)
}
