use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use fixpay_application::UploadAvatarUseCase;
use fixpay_core::{AccountStore, RevokedTokenStore};

use super::{caller_account_id, error::AccountApiError};
use crate::auth::authenticate;
use crate::http::{envelope::ApiEnvelope, state::AppState};

struct UploadedFile {
    bytes: Vec<u8>,
    content_type: String,
    filename: String,
}

/// Takes the first multipart part that carries a filename; extra parts are
/// ignored.
async fn read_file_part(mut multipart: Multipart) -> Result<UploadedFile, AccountApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AccountApiError::InvalidInput(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AccountApiError::InvalidInput(e.to_string()))?
            .to_vec();

        return Ok(UploadedFile {
            bytes,
            content_type,
            filename,
        });
    }

    Err(AccountApiError::InvalidInput(
        "no file was uploaded".to_string(),
    ))
}

#[tracing::instrument(name = "Upload avatar", skip_all)]
pub async fn upload_avatar<A, R>(
    State(state): State<AppState<A, R>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, AccountApiError>
where
    A: AccountStore + Clone + 'static,
    R: RevokedTokenStore + Clone + 'static,
{
    let claims = authenticate(&headers, &state.revoked_tokens, &state.token_config).await?;
    let account_id = caller_account_id(&claims)?;

    let file = read_file_part(multipart).await?;

    let use_case = UploadAvatarUseCase::new(state.accounts.clone(), state.storage.clone());
    let projection = use_case
        .execute(account_id, file.bytes, &file.content_type, &file.filename)
        .await?;

    Ok(Json(ApiEnvelope::success(
        "file uploaded successfully",
        projection,
    )))
}
