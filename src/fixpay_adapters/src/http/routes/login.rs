use axum::{extract::State, response::IntoResponse, Json};
use fixpay_application::LoginUseCase;
use fixpay_core::{
    AccountProjection, AccountStore, Email, Password, RevokedTokenStore,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::AccountApiError;
use crate::auth::issue_session_token;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub account: AccountProjection,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<A, R>(
    State(state): State<AppState<A, R>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(state.accounts.clone(), state.hasher.clone());
    let account = use_case.execute(email, password).await?;

    let token = issue_session_token(&account, &state.token_config)?;

    Ok(Json(ApiEnvelope::success(
        "logged in successfully",
        LoginResponse {
            token,
            account: AccountProjection::from(&account),
        },
    )))
}
