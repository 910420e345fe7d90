use std::env;
use std::path::PathBuf;

/// Process-wide configuration, read from the environment once at startup
/// and passed explicitly to every component.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on (default: 8080)
    pub port: u16,

    /// Optional URL prefix all routes are mounted under (default: none)
    pub context_path: String,

    /// Base directory holding the content and metadata roots (default: /tmp)
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            context_path: String::new(),
            data_dir: PathBuf::from("/tmp"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            context_path: env::var("API_CONTEXT_PATH").unwrap_or(default.context_path),

            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.data_dir),
        }
    }

    /// Root directory for stored file content.
    pub fn files_root(&self) -> PathBuf {
        self.data_dir.join("files")
    }

    /// Root directory for stored display-name metadata.
    pub fn metadata_root(&self) -> PathBuf {
        self.data_dir.join("metadata")
    }

    /// Location of the known-infected reference payload used by the
    /// readiness probe.
    pub fn reference_payload_path(&self) -> PathBuf {
        self.data_dir.join("eicar.txt")
    }
}
