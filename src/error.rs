use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("The ClamAV daemon is not ready (yet) - please wait")]
    EngineNotReady,

    #[error("Clamscan execution failed")]
    ScanFailed,

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The wire contract surfaces every client-visible failure as a
        // 400 with a plain-text detail line.
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::EngineNotReady | AppError::ScanFailed => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
