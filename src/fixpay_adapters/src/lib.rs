pub mod auth;
pub mod config;
pub mod crypto;
pub mod email;
pub mod http;
pub mod notifier;
pub mod persistence;
pub mod storage;
