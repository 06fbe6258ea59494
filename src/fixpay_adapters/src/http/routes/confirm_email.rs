use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use fixpay_application::ConfirmEmailUseCase;
use fixpay_core::{AccountStore, OtpCode, RevokedTokenStore};
use secrecy::Secret;
use serde::Deserialize;

use super::{caller_account_id, error::AccountApiError};
use crate::auth::authenticate;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[derive(Deserialize)]
pub struct ConfirmEmailRequest {
    pub otp: Secret<String>,
}

#[tracing::instrument(name = "Confirm email", skip_all)]
pub async fn confirm_email<A, R>(
    State(state): State<AppState<A, R>>,
    headers: HeaderMap,
    Json(request): Json<ConfirmEmailRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let claims = authenticate(&headers, &state.revoked_tokens, &state.token_config).await?;
    let account_id = caller_account_id(&claims)?;
    let code = OtpCode::try_from(request.otp)?;

    let use_case = ConfirmEmailUseCase::new(state.accounts.clone(), state.hasher.clone());
    let projection = use_case.execute(account_id, code).await?;

    Ok(Json(ApiEnvelope::success(
        "email confirmed successfully",
        projection,
    )))
}
