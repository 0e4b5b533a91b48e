use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadError;
use crate::state::AppState;
use crate::utils::upload::{check_content_length, extract_file_part};
use audiogate_core::models::{AudioFileResponse, AudioUploadResponse};
use audiogate_core::AppError;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/audio/upload",
    tag = "audio",
    security(("bearer_auth" = [])),
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Form with the file in field `audiofile`"),
    responses(
        (status = 201, description = "Audio uploaded", body = AudioUploadResponse),
        (status = 400, description = "Missing, malformed or oversized file", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Storage or metadata failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, auth, headers, multipart),
    fields(user_id = %auth.user_id, operation = "upload_audio")
)]
pub async fn upload_audio(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let max_file_size = state.uploads.max_file_size();

    check_content_length(&headers, max_file_size).map_err(AppError::from)?;
    let multipart =
        multipart.map_err(|rejection| AppError::from(UploadError::Malformed(rejection.body_text())))?;

    let file = extract_file_part(multipart, max_file_size)
        .await
        .map_err(AppError::from)?;

    let outcome = state
        .uploads
        .upload(auth.user_id, file)
        .await
        .map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(AudioUploadResponse {
            id: outcome.record.id,
            s3_key: outcome.record.s3_key,
            message: "Audio file uploaded successfully".to_string(),
            file_url: outcome.file_url,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/audio/{id}",
    tag = "audio",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Audio file ID")),
    responses(
        (status = 200, description = "Audio file found", body = AudioFileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Audio file not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, auth),
    fields(user_id = %auth.user_id, audio_id = %id, operation = "get_audio")
)]
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AudioFileResponse>, HttpAppError> {
    let audio = state
        .audio
        .find_for_user(auth.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Audio file not found".to_string()))?;

    let file_url = state.storage.object_url(&audio.s3_key);
    Ok(Json(AudioFileResponse::new(audio, file_url)))
}
