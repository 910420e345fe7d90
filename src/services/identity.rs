use anyhow::{Context, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Opaque identifier naming one stored file record.
///
/// Sixteen bytes from the OS entropy source, rendered as five
/// hyphen-separated hex groups (4-2-2-2-6 bytes). Not an RFC 4122 UUID:
/// no version or variant bits are set, every bit is random.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    pub fn generate() -> Result<Self> {
        let mut b = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut b)
            .context("unable to generate random identifier")?;

        Ok(Self(format!(
            "{}-{}-{}-{}-{}",
            hex::encode(&b[0..4]),
            hex::encode(&b[4..6]),
            hex::encode(&b[6..8]),
            hex::encode(&b[8..10]),
            hex::encode(&b[10..16]),
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the lowercase hex SHA-256 digest of a persisted file.
///
/// Reads the bytes back from storage rather than hashing any in-memory
/// upload buffer, so the digest reflects exactly what was committed.
pub async fn checksum(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("unable to open file {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file
            .read(&mut buffer)
            .await
            .context("unable to read file for checksum")?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let digest = hex::encode(hasher.finalize());
    tracing::info!("File checksum: {}", digest);
    Ok(digest)
}
