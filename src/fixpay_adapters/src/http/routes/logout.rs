use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use fixpay_application::LogoutUseCase;
use fixpay_core::{AccountStore, RevokedTokenStore};

use super::error::AccountApiError;
use crate::auth::authenticate;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<A, R>(
    State(state): State<AppState<A, R>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let claims = authenticate(&headers, &state.revoked_tokens, &state.token_config).await?;

    let use_case = LogoutUseCase::new(state.revoked_tokens.clone());
    use_case.execute(claims.jti.clone(), claims.remaining_ttl()).await?;

    Ok(Json(ApiEnvelope::success_empty("logged out successfully")))
}
