use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use fixpay_application::RegisterUseCase;
use fixpay_core::{
    parse_date_of_birth, AccountStore, Address, Email, FullName, Gender, NationalId, NewAccount,
    Password, PhoneNumber, RevokedTokenStore, Role, Username,
};
use secrecy::Secret;
use serde::Deserialize;

use super::error::AccountApiError;
use crate::http::{envelope::ApiEnvelope, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub user_name: String,
    pub password: Secret<String>,
    pub phone_number: String,
    pub national_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// `DD-MM-YYYY`.
    pub date_of_birth: String,
    /// false = male, true = female.
    pub gender: bool,
    pub address: Option<AddressRequest>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct AddressRequest {
    pub government: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
}

impl RegisterRequest {
    fn parse(self) -> Result<(NewAccount, Password), AccountApiError> {
        let role = match self.role.as_deref() {
            Some(raw) => raw.parse::<Role>()?,
            None => Role::default(),
        };

        let details = NewAccount {
            email: Email::try_from(self.email)?,
            username: Username::try_from(self.user_name)?,
            phone: PhoneNumber::try_from(self.phone_number)?,
            national_id: self.national_id.map(NationalId::try_from).transpose()?,
            name: FullName::new(&self.first_name, &self.last_name)?,
            date_of_birth: parse_date_of_birth(&self.date_of_birth)?,
            gender: Gender::from(self.gender),
            address: self
                .address
                .map(|a| Address::new(a.government, a.city, a.street)),
            role,
        };
        let password = Password::try_from(self.password)?;
        Ok((details, password))
    }
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<A, R>(
    State(state): State<AppState<A, R>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let (details, password) = request.parse()?;

    let use_case = RegisterUseCase::new(
        state.accounts.clone(),
        state.hasher.clone(),
        state.notifier.clone(),
    );
    let projection = use_case.execute(details, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::success(
            "account created, a confirmation code was sent to your email",
            projection,
        )),
    ))
}
