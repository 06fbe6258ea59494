use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    email::Email,
    identity::{NationalId, PhoneNumber, Username},
    otp::OtpChallenge,
    profile::{Address, FullName, Gender, Role},
    serde_secret,
};

pub const RESTORE_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_AVATAR: &str = "uploads/default.png";
pub const DEFAULT_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw).map(Self)
    }
}

/// Deleted-but-restorable marker. Its presence alone means the account is
/// soft deleted, so the restore deadline always exists alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftDelete {
    pub deleted_at: DateTime<Utc>,
    pub restore_until: DateTime<Utc>,
}

impl SoftDelete {
    pub fn starting(now: DateTime<Utc>) -> Self {
        Self {
            deleted_at: now,
            restore_until: now + Duration::days(RESTORE_WINDOW_DAYS),
        }
    }

    /// Restorable through the exact deadline instant.
    pub fn is_restorable(&self, now: DateTime<Utc>) -> bool {
        now <= self.restore_until
    }
}

/// Validated registration input, before the password is hashed and an id
/// is assigned.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Email,
    pub username: Username,
    pub phone: PhoneNumber,
    pub national_id: Option<NationalId>,
    pub name: FullName,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub address: Option<Address>,
    pub role: Role,
}

/// Profile fields a client may change after registration. Unique identity
/// fields and lifecycle state are deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<FullName>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<Address>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.address.is_none()
    }
}

/// One user account. Lifecycle sub-fields (verification, challenges,
/// deletion) are written through the methods below only; stores persist
/// the document wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    email: Email,
    username: Username,
    phone: PhoneNumber,
    national_id: Option<NationalId>,
    #[serde(with = "serde_secret")]
    password_hash: Secret<String>,
    name: FullName,
    date_of_birth: NaiveDate,
    gender: Gender,
    address: Option<Address>,
    role: Role,
    avatar: String,
    rating: u8,
    created_at: DateTime<Utc>,
    verified_at: Option<DateTime<Utc>>,
    confirmation_otp: Option<OtpChallenge>,
    reset_otp: Option<OtpChallenge>,
    deletion: Option<SoftDelete>,
}

impl Account {
    pub fn create(
        details: NewAccount,
        password_hash: Secret<String>,
        confirmation: OtpChallenge,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            email: details.email,
            username: details.username,
            phone: details.phone,
            national_id: details.national_id,
            password_hash,
            name: details.name,
            date_of_birth: details.date_of_birth,
            gender: details.gender,
            address: details.address,
            role: details.role,
            avatar: DEFAULT_AVATAR.to_string(),
            rating: DEFAULT_RATING,
            created_at: now,
            verified_at: None,
            confirmation_otp: Some(confirmation),
            reset_otp: None,
            deletion: None,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn national_id(&self) -> Option<&NationalId> {
        self.national_id.as_ref()
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }

    pub fn name(&self) -> &FullName {
        &self.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.verified_at
    }

    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }

    pub fn confirmation_otp(&self) -> Option<&OtpChallenge> {
        self.confirmation_otp.as_ref()
    }

    pub fn reset_otp(&self) -> Option<&OtpChallenge> {
        self.reset_otp.as_ref()
    }

    pub fn deletion(&self) -> Option<&SoftDelete> {
        self.deletion.as_ref()
    }

    /// Replaces the outstanding confirmation challenge wholesale.
    pub fn start_confirmation(&mut self, challenge: OtpChallenge) {
        self.confirmation_otp = Some(challenge);
    }

    /// Marks the email as verified and consumes the challenge. The
    /// verification timestamp is written at most once.
    pub fn confirm_email(&mut self, now: DateTime<Utc>) {
        if self.verified_at.is_none() {
            self.verified_at = Some(now);
        }
        self.confirmation_otp = None;
    }

    /// Replaces the outstanding reset challenge wholesale.
    pub fn start_password_reset(&mut self, challenge: OtpChallenge) {
        self.reset_otp = Some(challenge);
    }

    pub fn complete_password_reset(&mut self, new_hash: Secret<String>) {
        self.password_hash = new_hash;
        self.reset_otp = None;
    }

    /// Enters the deleted-but-restorable state. Deleting an account that
    /// is already deleted keeps the original timestamps.
    pub fn schedule_deletion(&mut self, now: DateTime<Utc>) {
        if self.deletion.is_none() {
            self.deletion = Some(SoftDelete::starting(now));
        }
    }

    pub fn restore(&mut self) {
        self.deletion = None;
    }

    pub fn set_avatar(&mut self, path: String) {
        self.avatar = path;
    }

    pub fn apply_profile_patch(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
    }
}

/// Client-facing view of an account. Hashes and challenges never appear
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProjection {
    pub id: AccountId,
    pub email: String,
    pub user_name: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    pub name: FullName,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub role: Role,
    pub avatar: String,
    pub rating: u8,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountProjection {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: String::from(account.email.clone()),
            user_name: account.username.as_str().to_string(),
            phone_number: account.phone.as_str().to_string(),
            national_id: account
                .national_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            name: account.name.clone(),
            date_of_birth: account.date_of_birth,
            gender: account.gender,
            address: account.address.clone(),
            role: account.role,
            avatar: account.avatar.clone(),
            rating: account.rating,
            verified: account.is_verified(),
            created_at: account.created_at,
        }
    }
}
