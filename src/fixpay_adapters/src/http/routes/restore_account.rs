use axum::{extract::State, response::IntoResponse, Json};
use fixpay_application::RestoreAccountUseCase;
use fixpay_core::{AccountStore, Email, Password, RevokedTokenStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AccountApiError;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[derive(Deserialize)]
pub struct RestoreAccountRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Credentials instead of a bearer token: the caller's session was revoked
/// when the account was deleted.
#[tracing::instrument(name = "Restore account", skip_all)]
pub async fn restore_account<A, R>(
    State(state): State<AppState<A, R>>,
    Json(request): Json<RestoreAccountRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = RestoreAccountUseCase::new(state.accounts.clone(), state.hasher.clone());
    let projection = use_case.execute(email, password).await?;

    Ok(Json(ApiEnvelope::success(
        "account restored successfully",
        projection,
    )))
}
