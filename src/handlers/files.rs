use crate::error::AppError;
use crate::handlers::ScanQuery;
use crate::models::{UploadBody, UploadOutcome};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// POST /api/v1/file/base64[?scan=true]
///
/// Accepts `{ "base64": "...", "name": "..." }`. The payload must be
/// well-formed base64; nothing touches storage otherwise.
pub async fn upload_base64(
    State(state): State<AppState>,
    Query(params): Query<ScanQuery>,
    Json(body): Json<UploadBody>,
) -> Result<Json<UploadOutcome>, AppError> {
    tracing::info!("Received base64 encoded file");

    let decoded = BASE64.decode(body.base64_str.as_bytes()).map_err(|e| {
        tracing::info!("Base64 string invalid: {}", e);
        AppError::BadRequest("Base64 decoding failed".to_string())
    })?;

    let outcome = state
        .intake
        .ingest(&decoded, body.name, params.scan_requested())
        .await?;
    Ok(Json(outcome))
}

/// POST /api/v1/file/form[?scan=true]
///
/// Accepts a multipart form with a single `file` field; the client
/// filename becomes the stored display name. Form size is capped by the
/// body limit configured on this route.
pub async fn upload_form(
    State(state): State<AppState>,
    Query(params): Query<ScanQuery>,
    mut multipart: Multipart,
) -> Result<Json<UploadOutcome>, AppError> {
    tracing::info!("Received multipart/form-data file");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let display_name = field.file_name().map(|s| s.to_string());
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Unable to read form file: {}", e)))?;

        let outcome = state
            .intake
            .ingest(&content, display_name, params.scan_requested())
            .await?;
        return Ok(Json(outcome));
    }

    Err(AppError::BadRequest(
        "No file field in form data".to_string(),
    ))
}

/// DELETE /api/v1/file/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.lifecycle.delete(&id).await?;
    Ok(StatusCode::OK)
}
