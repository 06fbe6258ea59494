use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use fixpay_application::UpdateProfileUseCase;
use fixpay_core::{
    parse_date_of_birth, AccountId, AccountProjection, AccountStore, Address, FullName, Gender,
    ProfilePatch, RevokedTokenStore,
};
use serde::Deserialize;

use super::{caller_account_id, error::AccountApiError};
use crate::auth::authenticate;
use crate::http::{envelope::ApiEnvelope, state::AppState};

fn parse_account_id(raw: &str) -> Result<AccountId, AccountApiError> {
    AccountId::from_str(raw)
        .map_err(|_| AccountApiError::InvalidInput("invalid account id".to_string()))
}

#[tracing::instrument(name = "List accounts", skip_all)]
pub async fn list_accounts<A, R>(
    State(state): State<AppState<A, R>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    authenticate(&headers, &state.revoked_tokens, &state.token_config).await?;

    let accounts = state.accounts.list().await?;
    let projections: Vec<AccountProjection> =
        accounts.iter().map(AccountProjection::from).collect();

    Ok(Json(ApiEnvelope::success("accounts", projections)))
}

#[tracing::instrument(name = "Get account", skip_all)]
pub async fn get_account<A, R>(
    State(state): State<AppState<A, R>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    authenticate(&headers, &state.revoked_tokens, &state.token_config).await?;
    let account_id = parse_account_id(&id)?;

    let account = state.accounts.find_by_id(&account_id).await?;

    Ok(Json(ApiEnvelope::success(
        "account",
        AccountProjection::from(&account),
    )))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<bool>,
    pub address: Option<UpdateAddressRequest>,
}

#[derive(Deserialize)]
pub struct UpdateAddressRequest {
    pub government: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
}

impl UpdateProfileRequest {
    fn parse(self) -> Result<ProfilePatch, AccountApiError> {
        let name = match (self.first_name, self.last_name) {
            (Some(first), Some(last)) => Some(FullName::new(&first, &last)?),
            (None, None) => None,
            _ => {
                return Err(AccountApiError::InvalidInput(
                    "firstName and lastName must be changed together".to_string(),
                ))
            }
        };

        Ok(ProfilePatch {
            name,
            date_of_birth: self
                .date_of_birth
                .as_deref()
                .map(parse_date_of_birth)
                .transpose()?,
            gender: self.gender.map(Gender::from),
            address: self
                .address
                .map(|a| Address::new(a.government, a.city, a.street)),
        })
    }
}

#[tracing::instrument(name = "Update profile", skip_all)]
pub async fn update_profile<A, R>(
    State(state): State<AppState<A, R>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let claims = authenticate(&headers, &state.revoked_tokens, &state.token_config).await?;
    let caller_id = caller_account_id(&claims)?;
    let target_id = parse_account_id(&id)?;
    let patch = request.parse()?;

    let use_case = UpdateProfileUseCase::new(state.accounts.clone());
    let projection = use_case
        .execute(caller_id, claims.role, target_id, patch)
        .await?;

    Ok(Json(ApiEnvelope::success(
        "profile updated successfully",
        projection,
    )))
}
