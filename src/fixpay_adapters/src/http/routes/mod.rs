pub mod accounts;
pub mod confirm_email;
pub mod delete_account;
pub mod error;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod register;
pub mod resend_confirmation;
pub mod reset_password;
pub mod restore_account;
pub mod upload;

use std::str::FromStr;

pub use accounts::{get_account, list_accounts, update_profile};
pub use confirm_email::confirm_email;
pub use delete_account::delete_account;
pub use error::{set_production_mode, AccountApiError};
use fixpay_core::AccountId;
pub use forgot_password::forgot_password;
pub use login::login;
pub use logout::logout;
pub use register::register;
pub use resend_confirmation::resend_confirmation;
pub use reset_password::reset_password;
pub use restore_account::restore_account;
pub use upload::upload_avatar;

use crate::auth::SessionClaims;

/// The sub claim is written from an `AccountId`, so failing to parse it
/// back means the token was not ours.
pub(crate) fn caller_account_id(claims: &SessionClaims) -> Result<AccountId, AccountApiError> {
    AccountId::from_str(&claims.sub)
        .map_err(|_| AccountApiError::AuthenticationError("The token is invalid".to_string()))
}
