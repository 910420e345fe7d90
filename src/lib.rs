pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use crate::config::Config;
use crate::services::intake::IntakeService;
use crate::services::lifecycle::LifecycleService;
use crate::services::scanner::Scanner;
use crate::services::storage::FileStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Multipart form parsing is capped to keep memory bounded.
const MAX_FORM_BODY: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<FileStore>,
    pub intake: Arc<IntakeService>,
    pub lifecycle: Arc<LifecycleService>,
}

impl AppState {
    pub fn new(config: Config, scanner: Arc<dyn Scanner>) -> Self {
        let store = Arc::new(FileStore::new(config.files_root(), config.metadata_root()));
        let intake = Arc::new(IntakeService::new(store.clone(), scanner.clone()));
        let lifecycle = Arc::new(LifecycleService::new(
            store.clone(),
            scanner,
            config.reference_payload_path(),
        ));

        Self {
            config,
            store,
            intake,
            lifecycle,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let context_path = state.config.context_path.clone();

    let router = Router::new()
        .route("/", get(handlers::health::root_banner))
        .route("/api/v1", get(handlers::health::root_banner))
        .route("/api/v1/file/base64", post(handlers::files::upload_base64))
        .route(
            "/api/v1/file/form",
            post(handlers::files::upload_form).layer(DefaultBodyLimit::max(MAX_FORM_BODY)),
        )
        .route("/api/v1/file/:id", delete(handlers::files::delete_file))
        .route("/api/v1/scan/all", get(handlers::scan::scan_all))
        .route("/api/v1/scan/:id", get(handlers::scan::scan_file))
        .route(
            "/api/v1/database/update",
            post(handlers::database::update_databases),
        )
        .route("/api/v1/health/ready", get(handlers::health::readiness))
        .with_state(state);

    if context_path.is_empty() {
        router
    } else {
        Router::new().nest(&context_path, router)
    }
}
