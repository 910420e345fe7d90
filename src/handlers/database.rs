use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, http::StatusCode};

/// POST /api/v1/database/update
///
/// Triggers a signature database refresh via the engine's updater.
pub async fn update_databases(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.lifecycle.update_database().await?;
    Ok(StatusCode::OK)
}
