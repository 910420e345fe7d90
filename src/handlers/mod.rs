pub mod database;
pub mod files;
pub mod health;
pub mod scan;

use serde::Deserialize;

/// Query string shared by both upload variants: `?scan=true` requests
/// an immediate scan after persistence.
#[derive(Debug, Deserialize, Default)]
pub struct ScanQuery {
    #[serde(default)]
    pub scan: Option<String>,
}

impl ScanQuery {
    pub fn scan_requested(&self) -> bool {
        self.scan.as_deref() == Some("true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_requested() {
        assert!(ScanQuery {
            scan: Some("true".into())
        }
        .scan_requested());
        assert!(!ScanQuery {
            scan: Some("false".into())
        }
        .scan_requested());
        assert!(!ScanQuery::default().scan_requested());
    }
}
