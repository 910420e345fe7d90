use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET / and GET /api/v1
pub async fn root_banner() -> Json<&'static str> {
    Json("Clamgate - file intake and malware scanning API")
}

/// GET /api/v1/health/ready
///
/// Ready means the engine correctly flags the reference payload as
/// infected. Every other verdict reports unhealthy.
pub async fn readiness(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.lifecycle.readiness().await?;
    Ok(StatusCode::OK)
}
