#![allow(dead_code)]

use anyhow::{anyhow, Result};
use axum::Router;
use clamgate::config::Config;
use clamgate::services::lifecycle::EICAR_TEST_SIGNATURE;
use clamgate::services::scanner::{ScanReport, ScanVerdict, Scanner};
use clamgate::{create_app, AppState};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Stand-in engine that flags any file containing the EICAR signature,
/// mirroring what a real ClamAV daemon reports. Directories are walked
/// one level deep, matching a directory-wide clamdscan invocation.
pub struct EicarDetectingScanner;

fn contains_signature(content: &[u8]) -> bool {
    content
        .windows(EICAR_TEST_SIGNATURE.len())
        .any(|w| w == EICAR_TEST_SIGNATURE)
}

#[async_trait::async_trait]
impl Scanner for EicarDetectingScanner {
    async fn scan_path(&self, path: &Path) -> ScanReport {
        let mut hits = Vec::new();

        if path.is_dir() {
            let mut entries = match tokio::fs::read_dir(path).await {
                Ok(entries) => entries,
                Err(_) => {
                    return ScanReport {
                        verdict: ScanVerdict::ExecutionFailed,
                        output: String::new(),
                    }
                }
            };
            while let Ok(Some(entry)) = entries.next_entry().await {
                if let Ok(content) = tokio::fs::read(entry.path()).await {
                    if contains_signature(&content) {
                        hits.push(format!(
                            "{}: Eicar-Test-Signature FOUND",
                            entry.path().display()
                        ));
                    }
                }
            }
        } else {
            match tokio::fs::read(path).await {
                Ok(content) => {
                    if contains_signature(&content) {
                        hits.push(format!("{}: Eicar-Test-Signature FOUND", path.display()));
                    }
                }
                Err(_) => {
                    return ScanReport {
                        verdict: ScanVerdict::ExecutionFailed,
                        output: String::new(),
                    }
                }
            }
        }

        if hits.is_empty() {
            ScanReport {
                verdict: ScanVerdict::Clean,
                output: String::new(),
            }
        } else {
            ScanReport {
                verdict: ScanVerdict::Infected,
                output: hits.join("\n"),
            }
        }
    }

    async fn update_database(&self) -> Result<String> {
        Ok("database is up to date".to_string())
    }
}

/// Engine stub pinned to a single verdict, for exercising the abort and
/// readiness paths.
pub struct FixedVerdictScanner {
    pub verdict: ScanVerdict,
    pub update_ok: bool,
}

impl FixedVerdictScanner {
    pub fn new(verdict: ScanVerdict) -> Self {
        Self {
            verdict,
            update_ok: true,
        }
    }
}

#[async_trait::async_trait]
impl Scanner for FixedVerdictScanner {
    async fn scan_path(&self, _path: &Path) -> ScanReport {
        let output = if self.verdict == ScanVerdict::Infected {
            "stub: Eicar-Test-Signature FOUND".to_string()
        } else {
            String::new()
        };
        ScanReport {
            verdict: self.verdict,
            output,
        }
    }

    async fn update_database(&self) -> Result<String> {
        if self.update_ok {
            Ok("updated".to_string())
        } else {
            Err(anyhow!("freshclam failed: connection refused"))
        }
    }
}

/// Builds an app over a throwaway storage root. The TempDir must be kept
/// alive for the duration of the test.
pub async fn setup(scanner: Arc<dyn Scanner>) -> (TempDir, Router, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        port: 0,
        context_path: String::new(),
        data_dir: dir.path().to_path_buf(),
    };

    let state = AppState::new(config, scanner);
    state.store.init().await.unwrap();
    state.lifecycle.ensure_reference_payload().await.unwrap();

    let app = create_app(state.clone());
    (dir, app, state)
}
