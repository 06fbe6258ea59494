//! # FixPay - Account Service Library
//!
//! This is a facade crate that re-exports all public APIs from the account service components.
//! Use this crate to get access to all account functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! fixpay = { path = "../fixpay" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, etc.
//! - **Repository traits**: `AccountStore`, `RevokedTokenStore`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `RedisRevokedTokenStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `AccountService` - The main entry point for the account service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use fixpay_core::*;
}

// Re-export most commonly used core types at the root level
pub use fixpay_core::{
    Account, AccountId, AccountProjection, Email, NewAccount, OtpChallenge, OtpCode, Password,
    ProfilePatch,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use fixpay_core::{
        AccountStore, AccountStoreError, RevokedTokenStore, RevokedTokenStoreError,
    };
}

// Re-export repository traits at root level
pub use core::{
    AccountStore, AccountStoreError, CredentialHasher, EmailClient, Notifier, ObjectStorage,
    RevokedTokenStore, RevokedTokenStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use fixpay_application::*;
}

// Re-export use cases at root level
pub use fixpay_application::{
    ConfirmEmailUseCase, DeleteAccountUseCase, ForgotPasswordUseCase, LoginUseCase, LogoutUseCase,
    RegisterUseCase, ResendConfirmationUseCase, ResetPasswordUseCase, RestoreAccountUseCase,
    UpdateProfileUseCase, UploadAvatarUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP envelope, state and route handlers
    pub mod http {
        pub use fixpay_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use fixpay_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use fixpay_adapters::email::*;
    }

    /// OTP email delivery channel
    pub mod notifier {
        pub use fixpay_adapters::notifier::*;
    }

    /// Session token utilities
    pub mod auth {
        pub use fixpay_adapters::auth::*;
    }

    /// Credential hashing
    pub mod crypto {
        pub use fixpay_adapters::crypto::*;
    }

    /// Uploaded file storage
    pub mod storage {
        pub use fixpay_adapters::storage::*;
    }

    /// Configuration
    pub mod config {
        pub use fixpay_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use fixpay_adapters::{
    crypto::Argon2Hasher,
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{
        InMemoryAccountStore, InMemoryRevokedTokenStore, PostgresAccountStore,
        RedisRevokedTokenStore,
    },
    storage::LocalObjectStorage,
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

/// Main account service
pub use fixpay_service::AccountService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
