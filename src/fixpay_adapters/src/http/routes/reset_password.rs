use axum::{extract::State, response::IntoResponse, Json};
use fixpay_application::ResetPasswordUseCase;
use fixpay_core::{AccountStore, Email, OtpCode, Password, RevokedTokenStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AccountApiError;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Secret<String>,
    pub otp: Secret<String>,
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<A, R>(
    State(state): State<AppState<A, R>>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let code = OtpCode::try_from(request.otp)?;
    let new_password = Password::try_from(request.new_password)?;

    let use_case = ResetPasswordUseCase::new(state.accounts.clone(), state.hasher.clone());
    use_case.execute(email, code, new_password).await?;

    Ok(Json(ApiEnvelope::success_empty(
        "password reset successfully",
    )))
}
