pub mod session_token;

pub use session_token::{
    authenticate, decode_session_claims, issue_session_token, SessionClaims, SessionTokenConfig,
    TokenAuthError, BEARER_PREFIX,
};
