use crate::error::AppError;
use crate::models::ScanOutcome;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// GET /api/v1/scan/{id}
///
/// Scans one stored record. The content artifact is deleted after the
/// scan whatever the verdict.
pub async fn scan_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ScanOutcome>, AppError> {
    let outcome = state.lifecycle.scan_one(&id).await?;
    Ok(Json(outcome))
}

/// GET /api/v1/scan/all
///
/// Scans the whole content root in one engine invocation and purges it
/// afterwards. Returns a single aggregate outcome.
pub async fn scan_all(State(state): State<AppState>) -> Result<Json<ScanOutcome>, AppError> {
    let outcome = state.lifecycle.scan_all().await?;
    Ok(Json(outcome))
}
