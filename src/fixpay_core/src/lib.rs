pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{
        Account, AccountId, AccountProjection, NewAccount, ProfilePatch, SoftDelete,
        DEFAULT_AVATAR, DEFAULT_RATING, RESTORE_WINDOW_DAYS,
    },
    email::{Email, EmailError},
    identity::{
        NationalId, NationalIdError, PhoneNumber, PhoneNumberError, Username, UsernameError,
    },
    otp::{
        OtpChallenge, OtpCode, OtpCodeError, OtpPurpose, CONFIRMATION_OTP_TTL_MINUTES,
        OTP_LENGTH, OTP_RESEND_COOLDOWN_SECONDS, RESET_OTP_TTL_MINUTES,
    },
    password::{Password, PasswordError},
    profile::{
        parse_date_of_birth, Address, DateOfBirthError, FullName, FullNameError, Gender, Role,
        RoleError, DATE_OF_BIRTH_FORMAT,
    },
};

pub use ports::{
    repositories::{
        AccountStore, AccountStoreError, DuplicateField, RevokedTokenStore,
        RevokedTokenStoreError, UniqueIdentity,
    },
    services::{
        CredentialHasher, CredentialHasherError, EmailClient, Notification, Notifier,
        ObjectStorage, ObjectStorageError, StoredObject,
    },
};
