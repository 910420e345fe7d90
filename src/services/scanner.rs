use anyhow::{anyhow, Result};
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Wall-clock bound for an on-demand scan.
const SCAN_TIMEOUT: Duration = Duration::from_secs(180);

/// Wall-clock bound for a signature database update.
const UPDATE_TIMEOUT: Duration = Duration::from_secs(600);

/// Classification of a finished scan, derived from the engine's exit
/// status. This enum is the contract every caller branches on; nothing
/// outside this module sees raw exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanVerdict {
    /// No threat found.
    Clean,
    /// Threat found; the report carries the engine's detail text.
    Infected,
    /// The scanning daemon is not (yet) available.
    EngineNotReady,
    /// The scan never completed: timeout, missing executable, or an
    /// exit status the engine does not document.
    ExecutionFailed,
}

/// Outcome of one engine invocation. Never persisted.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub verdict: ScanVerdict,
    /// Raw engine output, populated only for infected results.
    pub output: String,
}

impl ScanReport {
    fn new(verdict: ScanVerdict, output: String) -> Self {
        Self { verdict, output }
    }
}

/// Maps a clamdscan exit status to a verdict.
///
/// 0 = clean, 1 = threat found, 2 = daemon unavailable, 124/127 =
/// timeout wrapper conventions for "timed out" / "command not found".
/// Any other status (including signal termination, where no code is
/// available) is deliberately treated as a failed execution rather
/// than an implicit success.
fn classify_exit(code: Option<i32>) -> ScanVerdict {
    match code {
        Some(0) => ScanVerdict::Clean,
        Some(1) => ScanVerdict::Infected,
        Some(2) => ScanVerdict::EngineNotReady,
        Some(124) | Some(127) => ScanVerdict::ExecutionFailed,
        _ => ScanVerdict::ExecutionFailed,
    }
}

/// Seam between the pipeline and the external scanning engine.
#[async_trait::async_trait]
pub trait Scanner: Send + Sync {
    /// Scans a single file or a whole directory.
    async fn scan_path(&self, path: &Path) -> ScanReport;

    /// Refreshes the engine's signature databases. Returns the engine's
    /// textual output on success.
    async fn update_database(&self) -> Result<String>;
}

/// Production scanner invoking the ClamAV daemon client (`clamdscan`)
/// as a bounded-time subprocess.
pub struct ClamdScanner {
    scan_command: String,
    update_command: String,
}

impl Default for ClamdScanner {
    fn default() -> Self {
        Self {
            scan_command: "clamdscan".to_string(),
            update_command: "freshclam".to_string(),
        }
    }
}

impl ClamdScanner {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run(command: &str, arg: Option<&Path>, timeout: Duration) -> Result<Output> {
        let mut cmd = Command::new(command);
        if let Some(arg) = arg {
            cmd.arg(arg);
        }
        // kill_on_drop reaps the child if the timeout fires below.
        cmd.kill_on_drop(true);

        match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(result) => result.map_err(|e| anyhow!("failed to execute {}: {}", command, e)),
            Err(_) => Err(anyhow!(
                "{} timed out after {} seconds",
                command,
                timeout.as_secs()
            )),
        }
    }
}

#[async_trait::async_trait]
impl Scanner for ClamdScanner {
    async fn scan_path(&self, path: &Path) -> ScanReport {
        tracing::info!("Scanning path: {}", path.display());

        let output = match Self::run(&self.scan_command, Some(path), SCAN_TIMEOUT).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Scan execution failed: {}", e);
                return ScanReport::new(ScanVerdict::ExecutionFailed, String::new());
            }
        };

        let verdict = classify_exit(output.status.code());
        let detail = if verdict == ScanVerdict::Infected {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            String::new()
        };
        ScanReport::new(verdict, detail)
    }

    async fn update_database(&self) -> Result<String> {
        tracing::info!("Virus database update requested - running freshclam");

        let output = Self::run(&self.update_command, None, UPDATE_TIMEOUT).await?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        match output.status.code() {
            Some(0) => {
                tracing::info!("Virus database update finished");
                Ok(stdout)
            }
            // freshclam exits 1 when the databases are already current.
            Some(1) => {
                tracing::info!("Virus databases up-to-date");
                Ok(stdout)
            }
            code => {
                tracing::error!("Virus database update failed (exit {:?})", code);
                Err(anyhow!(
                    "freshclam failed: {}",
                    String::from_utf8_lossy(&output.stderr)
                ))
            }
        }
    }
}
