use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::{header::RETRY_AFTER, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use fixpay_application::{
    ConfirmEmailError, DeleteAccountError, ForgotPasswordError, LoginError, LogoutError,
    RegisterError, ResendConfirmationError, ResetPasswordError, RestoreAccountError,
    UpdateProfileError, UploadAvatarError,
};
use fixpay_core::{
    AccountStoreError, CredentialHasherError, DateOfBirthError, DuplicateField, EmailError,
    FullNameError, NationalIdError, OtpCodeError, PasswordError, PhoneNumberError,
    RevokedTokenStoreError, RoleError, UsernameError,
};
use thiserror::Error;

use crate::auth::TokenAuthError;
use crate::http::envelope::ApiEnvelope;

static PRODUCTION_MODE: AtomicBool = AtomicBool::new(false);

/// In production the 500 body and the collided-field name are replaced
/// with generic messages. Called once at startup.
pub fn set_production_mode(enabled: bool) {
    PRODUCTION_MODE.store(enabled, Ordering::Relaxed);
}

fn production_mode() -> bool {
    PRODUCTION_MODE.load(Ordering::Relaxed)
}

#[derive(Debug, Error)]
pub enum AccountApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("The {0} is already signed")]
    Duplicate(DuplicateField),

    #[error("{0}")]
    AuthenticationError(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("a code was sent recently, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: i64 },

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, Json(ApiEnvelope::fail(message, None))).into_response()
            }

            Self::Duplicate(field) => {
                let (message, details) = if production_mode() {
                    ("the account could not be created".to_string(), None)
                } else {
                    (
                        Self::Duplicate(field).to_string(),
                        Some(serde_json::json!({ "field": field.as_str() })),
                    )
                };
                (StatusCode::BAD_REQUEST, Json(ApiEnvelope::fail(message, details)))
                    .into_response()
            }

            Self::AuthenticationError(message) => {
                (StatusCode::UNAUTHORIZED, Json(ApiEnvelope::fail(message, None))).into_response()
            }

            Self::Forbidden(message) => {
                (StatusCode::FORBIDDEN, Json(ApiEnvelope::fail(message, None))).into_response()
            }

            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ApiEnvelope::fail(message, None))).into_response()
            }

            Self::RateLimited { retry_after_secs } => {
                let body = ApiEnvelope::fail(
                    self.to_string(),
                    Some(serde_json::json!({ "retryAfterSeconds": retry_after_secs })),
                );
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(RETRY_AFTER, retry_after_secs.to_string())],
                    Json(body),
                )
                    .into_response()
            }

            Self::UnexpectedError(detail) => {
                tracing::error!(error = %detail, "request failed unexpectedly");
                let message = if production_mode() {
                    "something went wrong".to_string()
                } else {
                    format!("Unexpected error: {detail}")
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiEnvelope::error(message)),
                )
                    .into_response()
            }
        }
    }
}

// Field validation failures all land on the 400 fail branch.
macro_rules! invalid_input {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for AccountApiError {
                fn from(error: $error) -> Self {
                    AccountApiError::InvalidInput(error.to_string())
                }
            }
        )+
    };
}

invalid_input!(
    EmailError,
    PasswordError,
    UsernameError,
    PhoneNumberError,
    NationalIdError,
    FullNameError,
    DateOfBirthError,
    OtpCodeError,
    RoleError,
);

impl From<AccountStoreError> for AccountApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::Duplicate(field) => AccountApiError::Duplicate(field),
            AccountStoreError::AccountNotFound => {
                AccountApiError::NotFound("Account not found".to_string())
            }
            AccountStoreError::UnexpectedError(e) => AccountApiError::UnexpectedError(e),
        }
    }
}

impl From<RevokedTokenStoreError> for AccountApiError {
    fn from(error: RevokedTokenStoreError) -> Self {
        AccountApiError::UnexpectedError(error.to_string())
    }
}

impl From<CredentialHasherError> for AccountApiError {
    fn from(error: CredentialHasherError) -> Self {
        AccountApiError::UnexpectedError(error.to_string())
    }
}

impl From<TokenAuthError> for AccountApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken
            | TokenAuthError::InvalidToken
            | TokenAuthError::SessionEnded => AccountApiError::AuthenticationError(error.to_string()),
            TokenAuthError::UnexpectedError(e) => AccountApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for AccountApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::Duplicate(field) => AccountApiError::Duplicate(field),
            RegisterError::NationalIdRequired => {
                AccountApiError::InvalidInput(error.to_string())
            }
            RegisterError::HasherError(e) => e.into(),
            RegisterError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ConfirmEmailError> for AccountApiError {
    fn from(error: ConfirmEmailError) -> Self {
        match error {
            ConfirmEmailError::NotFound => AccountApiError::NotFound(error.to_string()),
            ConfirmEmailError::AlreadyVerified
            | ConfirmEmailError::OtpExpired
            | ConfirmEmailError::WrongOtpPurpose
            | ConfirmEmailError::InvalidOtp => AccountApiError::InvalidInput(error.to_string()),
            ConfirmEmailError::HasherError(e) => e.into(),
            ConfirmEmailError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ResendConfirmationError> for AccountApiError {
    fn from(error: ResendConfirmationError) -> Self {
        match error {
            ResendConfirmationError::NotFound => AccountApiError::NotFound(error.to_string()),
            ResendConfirmationError::AlreadyVerified => {
                AccountApiError::InvalidInput(error.to_string())
            }
            ResendConfirmationError::RateLimited { retry_after_secs } => {
                AccountApiError::RateLimited { retry_after_secs }
            }
            ResendConfirmationError::HasherError(e) => e.into(),
            ResendConfirmationError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for AccountApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => {
                AccountApiError::AuthenticationError(error.to_string())
            }
            LoginError::AccountUnrestorable => AccountApiError::Forbidden(error.to_string()),
            LoginError::HasherError(e) => e.into(),
            LoginError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<LogoutError> for AccountApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::RevokedTokenStoreError(e) => e.into(),
        }
    }
}

impl From<ForgotPasswordError> for AccountApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::EmailNotVerified => AccountApiError::Forbidden(error.to_string()),
            ForgotPasswordError::RateLimited { retry_after_secs } => {
                AccountApiError::RateLimited { retry_after_secs }
            }
            ForgotPasswordError::HasherError(e) => e.into(),
            ForgotPasswordError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for AccountApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidOrExpiredOtp
            | ResetPasswordError::OtpExpired
            | ResetPasswordError::WrongOtpPurpose
            | ResetPasswordError::InvalidOtp
            | ResetPasswordError::PasswordUnchanged => {
                AccountApiError::InvalidInput(error.to_string())
            }
            ResetPasswordError::HasherError(e) => e.into(),
            ResetPasswordError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteAccountError> for AccountApiError {
    fn from(error: DeleteAccountError) -> Self {
        match error {
            DeleteAccountError::NotFound => AccountApiError::NotFound(error.to_string()),
            DeleteAccountError::AccountStoreError(e) => e.into(),
            DeleteAccountError::RevokedTokenStoreError(e) => e.into(),
        }
    }
}

impl From<RestoreAccountError> for AccountApiError {
    fn from(error: RestoreAccountError) -> Self {
        match error {
            RestoreAccountError::InvalidCredentials => {
                AccountApiError::AuthenticationError(error.to_string())
            }
            RestoreAccountError::NotDeleted => AccountApiError::InvalidInput(error.to_string()),
            RestoreAccountError::RestoreWindowExpired => {
                AccountApiError::Forbidden(error.to_string())
            }
            RestoreAccountError::HasherError(e) => e.into(),
            RestoreAccountError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateProfileError> for AccountApiError {
    fn from(error: UpdateProfileError) -> Self {
        match error {
            UpdateProfileError::Forbidden => AccountApiError::Forbidden(error.to_string()),
            UpdateProfileError::NotFound => AccountApiError::NotFound(error.to_string()),
            UpdateProfileError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<UploadAvatarError> for AccountApiError {
    fn from(error: UploadAvatarError) -> Self {
        match error {
            UploadAvatarError::InvalidFileFormat | UploadAvatarError::FileTooLarge => {
                AccountApiError::InvalidInput(error.to_string())
            }
            UploadAvatarError::NotFound => AccountApiError::NotFound(error.to_string()),
            UploadAvatarError::StorageError(e) => {
                AccountApiError::UnexpectedError(e.to_string())
            }
            UploadAvatarError::AccountStoreError(e) => e.into(),
        }
    }
}
