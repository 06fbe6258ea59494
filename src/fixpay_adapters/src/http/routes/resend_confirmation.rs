use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use fixpay_application::ResendConfirmationUseCase;
use fixpay_core::{AccountStore, RevokedTokenStore};

use super::{caller_account_id, error::AccountApiError};
use crate::auth::authenticate;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[tracing::instrument(name = "Resend confirmation OTP", skip_all)]
pub async fn resend_confirmation<A, R>(
    State(state): State<AppState<A, R>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let claims = authenticate(&headers, &state.revoked_tokens, &state.token_config).await?;
    let account_id = caller_account_id(&claims)?;

    let use_case = ResendConfirmationUseCase::new(
        state.accounts.clone(),
        state.hasher.clone(),
        state.notifier.clone(),
    );
    use_case.execute(account_id).await?;

    Ok(Json(ApiEnvelope::success_empty(
        "a new confirmation code was sent to your email",
    )))
}
