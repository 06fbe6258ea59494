use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use fixpay_application::DeleteAccountUseCase;
use fixpay_core::{AccountStore, RevokedTokenStore};

use super::{caller_account_id, error::AccountApiError};
use crate::auth::authenticate;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[tracing::instrument(name = "Delete account", skip_all)]
pub async fn delete_account<A, R>(
    State(state): State<AppState<A, R>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let claims = authenticate(&headers, &state.revoked_tokens, &state.token_config).await?;
    let account_id = caller_account_id(&claims)?;

    let use_case =
        DeleteAccountUseCase::new(state.accounts.clone(), state.revoked_tokens.clone());
    use_case
        .execute(account_id, claims.jti.clone(), claims.remaining_ttl())
        .await?;

    Ok(Json(ApiEnvelope::success_empty(
        "account deleted, it can be restored within 30 days",
    )))
}
