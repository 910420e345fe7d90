use crate::error::AppError;
use crate::models::UploadOutcome;
use crate::services::identity::{self, FileId};
use crate::services::scanner::{Scanner, ScanVerdict};
use crate::services::storage::FileStore;
use std::sync::Arc;

/// Validated-payload intake: persists content and metadata, fingerprints
/// the stored bytes, and optionally triggers an immediate scan.
///
/// Both upload variants (base64 body and multipart form) converge here
/// once their payload has been decoded.
pub struct IntakeService {
    store: Arc<FileStore>,
    scanner: Arc<dyn Scanner>,
}

impl IntakeService {
    pub fn new(store: Arc<FileStore>, scanner: Arc<dyn Scanner>) -> Self {
        Self { store, scanner }
    }

    pub async fn ingest(
        &self,
        content: &[u8],
        display_name: Option<String>,
        scan_requested: bool,
    ) -> Result<UploadOutcome, AppError> {
        // Shared guard: a concurrent bulk purge must not pull the record
        // out from under us between the write and the scan.
        let _guard = self.store.shared().await;

        let id = FileId::generate().map_err(|e| {
            tracing::error!("Unable to generate random identifier: {}", e);
            AppError::Internal(e.to_string())
        })?;

        let path = self.store.content_path(id.as_str());
        if let Err(e) = self.store.put(id.as_str(), content).await {
            tracing::error!("Unable to save file: {}", e);
            return Err(AppError::BadRequest(format!(
                "Unable to save file {}",
                path.display()
            )));
        }

        let name = display_name.unwrap_or_default();
        if let Err(e) = self.store.put_metadata(id.as_str(), &name).await {
            tracing::error!("Unable to save metadata file: {}", e);
            // Content was already committed; remove it so no orphaned
            // record survives a half-written pair.
            self.remove_content(&id).await;
            return Err(AppError::BadRequest(format!(
                "Unable to save metadata file {}",
                self.store.metadata_path(id.as_str()).display()
            )));
        }

        // Checksum is computed from the persisted bytes, after both
        // artifacts are durable.
        let checksum = match identity::checksum(&path).await {
            Ok(sum) => sum,
            Err(e) => {
                tracing::error!("Unable to generate file checksum: {}", e);
                self.remove_content(&id).await;
                return Err(AppError::BadRequest(
                    "Unable to generate file checksum".to_string(),
                ));
            }
        };

        let mut outcome = UploadOutcome {
            id: Some(id.to_string()),
            checksum: Some(checksum),
            ..Default::default()
        };

        if scan_requested {
            outcome.scanned = true;

            let report = self.scanner.scan_path(&path).await;
            match report.verdict {
                ScanVerdict::Clean => {}
                ScanVerdict::Infected => {
                    outcome.infected = true;
                    outcome.output = Some(report.output);
                    self.remove_content(&id).await;
                }
                // Content is retained on an aborted scan so an operator
                // can inspect or retry.
                ScanVerdict::EngineNotReady => return Err(AppError::EngineNotReady),
                ScanVerdict::ExecutionFailed => return Err(AppError::ScanFailed),
            }
        }

        Ok(outcome)
    }

    async fn remove_content(&self, id: &FileId) {
        if let Err(e) = self.store.delete(id.as_str()).await {
            tracing::warn!("Unable to remove content for {}: {}", id, e);
        }
    }
}
