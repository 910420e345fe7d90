use crate::error::AppError;
use crate::models::ScanOutcome;
use crate::services::identity;
use crate::services::scanner::{Scanner, ScanVerdict};
use crate::services::storage::FileStore;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// EICAR test signature, the industry-standard harmless payload every
/// scanning engine is required to flag as infected.
pub const EICAR_TEST_SIGNATURE: &[u8] =
    b"X5O!P%@AP[4\\PZX54(P^)7CC)7}$EICAR-STANDARD-ANTIVIRUS-TEST-FILE!$H+H*";

/// Drives single-file and bulk scans, post-scan retention, explicit
/// deletion, and the readiness self-test.
pub struct LifecycleService {
    store: Arc<FileStore>,
    scanner: Arc<dyn Scanner>,
    reference_payload: PathBuf,
}

impl LifecycleService {
    pub fn new(store: Arc<FileStore>, scanner: Arc<dyn Scanner>, reference_payload: PathBuf) -> Self {
        Self {
            store,
            scanner,
            reference_payload,
        }
    }

    /// Writes the readiness reference payload if it is not present yet.
    pub async fn ensure_reference_payload(&self) -> io::Result<()> {
        if tokio::fs::try_exists(&self.reference_payload).await? {
            return Ok(());
        }
        tokio::fs::write(&self.reference_payload, EICAR_TEST_SIGNATURE).await
    }

    /// Scans one record and deletes its content afterwards regardless of
    /// the verdict. On-demand scanning is destructive by design; the
    /// display name survives for later reference.
    pub async fn scan_one(&self, id: &str) -> Result<ScanOutcome, AppError> {
        let _guard = self.store.shared().await;

        let path = self.store.content_path(id);
        let checksum = identity::checksum(&path).await.map_err(|e| {
            tracing::error!("Unable to generate file checksum: {}", e);
            AppError::BadRequest(
                "Unable to generate file checksum - does the file still exist?".to_string(),
            )
        })?;

        let report = self.scanner.scan_path(&path).await;
        let infected = match report.verdict {
            ScanVerdict::Clean => false,
            ScanVerdict::Infected => true,
            ScanVerdict::EngineNotReady => return Err(AppError::EngineNotReady),
            ScanVerdict::ExecutionFailed => return Err(AppError::ScanFailed),
        };

        if infected {
            tracing::info!("Found infected file(s)!");
        } else {
            tracing::info!("File(s) clean");
        }

        let name = self.store.get_metadata(id).await;

        if let Err(e) = self.store.delete(id).await {
            tracing::warn!("Unable to remove scanned file {}: {}", id, e);
        }

        Ok(ScanOutcome {
            id: id.to_string(),
            name,
            checksum: Some(checksum),
            error: None,
            output: (!report.output.is_empty()).then_some(report.output),
            infected,
        })
    }

    /// Scans the entire content root as one directory-wide engine
    /// invocation, then purges and recreates the root. One aggregate
    /// verdict covers the whole collection; no checksum is computed.
    pub async fn scan_all(&self) -> Result<ScanOutcome, AppError> {
        let _guard = self.store.exclusive().await;

        let report = self.scanner.scan_path(self.store.files_root()).await;
        let infected = match report.verdict {
            ScanVerdict::Clean => false,
            ScanVerdict::Infected => true,
            ScanVerdict::EngineNotReady => return Err(AppError::EngineNotReady),
            ScanVerdict::ExecutionFailed => return Err(AppError::ScanFailed),
        };

        if infected {
            tracing::info!("Found infected file(s)!");
        } else {
            tracing::info!("File(s) clean");
        }

        self.store.delete_all().await?;

        Ok(ScanOutcome {
            id: "all".to_string(),
            name: None,
            checksum: None,
            error: None,
            output: (!report.output.is_empty()).then_some(report.output),
            infected,
        })
    }

    /// Removes the content artifact for `id`. A missing record is a
    /// client error, never a silent success.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.store.shared().await;

        self.store.delete(id).await.map_err(|e| {
            tracing::error!("File deletion failed: {}", e);
            if e.kind() == io::ErrorKind::NotFound {
                AppError::NotFound(e.to_string())
            } else {
                AppError::Storage(e)
            }
        })?;

        tracing::info!("File deleted");
        Ok(())
    }

    /// Readiness self-test: scans the known-infected reference payload.
    /// A correctly *detected* infection is the healthy signal; any other
    /// verdict means the engine is not operational.
    pub async fn readiness(&self) -> Result<(), AppError> {
        let report = self.scanner.scan_path(&self.reference_payload).await;
        match report.verdict {
            ScanVerdict::Infected => Ok(()),
            _ => Err(AppError::BadRequest(format!(
                "Health check failed: {}",
                report.output
            ))),
        }
    }

    /// Refreshes the engine's signature databases.
    pub async fn update_database(&self) -> Result<(), AppError> {
        self.scanner
            .update_database()
            .await
            .map(|output| tracing::info!("{}", output))
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}
