pub mod confirm_email;
pub mod delete_account;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod register;
pub mod resend_confirmation;
pub mod reset_password;
pub mod restore_account;
pub mod update_profile;
pub mod upload_avatar;

#[cfg(test)]
pub(crate) mod test_doubles;

pub use confirm_email::{ConfirmEmailError, ConfirmEmailUseCase};
pub use delete_account::{DeleteAccountError, DeleteAccountUseCase};
pub use forgot_password::{ForgotPasswordError, ForgotPasswordUseCase};
pub use login::{LoginError, LoginUseCase};
pub use logout::{LogoutError, LogoutUseCase};
pub use register::{RegisterError, RegisterUseCase};
pub use resend_confirmation::{ResendConfirmationError, ResendConfirmationUseCase};
pub use reset_password::{ResetPasswordError, ResetPasswordUseCase};
pub use restore_account::{RestoreAccountError, RestoreAccountUseCase};
pub use update_profile::{UpdateProfileError, UpdateProfileUseCase};
pub use upload_avatar::{
    UploadAvatarError, UploadAvatarUseCase, ALLOWED_UPLOAD_MIME_TYPES, MAX_UPLOAD_BYTES,
};
