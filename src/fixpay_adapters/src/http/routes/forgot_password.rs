use axum::{extract::State, response::IntoResponse, Json};
use fixpay_application::ForgotPasswordUseCase;
use fixpay_core::{AccountStore, Email, RevokedTokenStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AccountApiError;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

/// Serves both `/forgotPassword` and `/resend-resetpassword-otp`; the use
/// case reissues the challenge either way.
#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<A, R>(
    State(state): State<AppState<A, R>>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = ForgotPasswordUseCase::new(
        state.accounts.clone(),
        state.hasher.clone(),
        state.notifier.clone(),
    );
    use_case.execute(email).await?;

    // Unknown emails get this same answer.
    Ok(Json(ApiEnvelope::success_empty(
        "if the email is registered, a reset code was sent to it",
    )))
}
