use serde::{Deserialize, Serialize};

/// Payload returned by the REST API after a file upload.
#[derive(Debug, Clone, Serialize, Default)]
pub struct UploadOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "sha256sum", skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub scanned: bool,
    pub infected: bool,
}

/// Response given after an antivirus scan has finished.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "sha256sum", skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    pub infected: bool,
}

/// Body of a base64 file upload POST request.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadBody {
    #[serde(rename = "base64")]
    pub base64_str: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_outcome_omits_empty_fields() {
        let outcome = UploadOutcome {
            id: Some("abc".into()),
            checksum: Some("deadbeef".into()),
            scanned: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "sha256sum": "deadbeef",
                "scanned": true,
                "infected": false,
            })
        );
    }

    #[test]
    fn test_upload_body_name_optional() {
        let body: UploadBody = serde_json::from_str(r#"{"base64":"aGVsbG8="}"#).unwrap();
        assert_eq!(body.base64_str, "aGVsbG8=");
        assert!(body.name.is_none());
    }
}
