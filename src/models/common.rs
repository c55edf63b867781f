use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error payload returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_preview: Option<Value>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
            response_preview: None,
        }
    }
}

/// Result of the connectivity check behind `/api/test-generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TestGenerateReport {
    Success { response_keys: Vec<String> },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    pub status: String,
    pub gemini_api_key_set: bool,
    pub gemini_key_length: usize,
    pub gemini_key_preview: String,
    pub version: String,
    pub environment: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_shape() {
        let ok = TestGenerateReport::Success {
            response_keys: vec!["predictions".into()],
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "success", "response_keys": ["predictions"]})
        );

        let failed = TestGenerateReport::Failed {
            error: "boom".into(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"status": "failed", "error": "boom"})
        );
    }

    #[test]
    fn test_error_body_omits_empty_fields() {
        let body = ErrorBody::new("nope");
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({"message": "nope"}));
    }
}
