pub mod account;
pub mod email;
pub mod identity;
pub mod otp;
pub mod password;
pub mod profile;

pub(crate) mod serde_secret;
