use serde_json::Value;
use thiserror::Error;

/// Every failure a proxied image request can end in.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("missing GEMINI_API_KEY: no API key is configured for the upstream provider")]
    MissingCredential,

    #[error("upstream provider returned {status}")]
    Upstream { status: u16, detail: Value },

    #[error("no images found in the upstream response")]
    NoImagesFound { preview: Value },

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProxyError {
    /// Builds an upstream error from a raw response body, keeping it as JSON when it parses.
    pub fn upstream(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
        ProxyError::Upstream { status, detail }
    }

    /// True when the provider rejected the call because the model cannot do multimodal edits.
    pub fn indicates_unsupported(&self) -> bool {
        match self {
            ProxyError::Upstream { detail, .. } => {
                let text = match detail {
                    Value::String(s) => s.to_lowercase(),
                    other => other.to_string().to_lowercase(),
                };
                text.contains("not supported") || text.contains("unsupported")
            }
            _ => false,
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            ProxyError::MissingCredential => 500,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::NoImagesFound { .. } => 502,
            ProxyError::Validation(_) => 422,
            ProxyError::BadRequest(_) => 400,
            ProxyError::Http(_) | ProxyError::Serialization(_) => 500,
        }
    }

    /// JSON body returned to the caller.
    pub fn to_body(&self) -> crate::models::ErrorBody {
        let mut body = crate::models::ErrorBody::new(self.to_string());
        match self {
            ProxyError::Upstream { detail, .. } => body.detail = Some(detail.clone()),
            ProxyError::NoImagesFound { preview } => body.response_preview = Some(preview.clone()),
            _ => {}
        }
        body
    }
}

#[cfg(feature = "server")]
impl actix_web::ResponseError for ProxyError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from_u16(self.http_status())
            .unwrap_or(actix_web::http::StatusCode::BAD_GATEWAY)
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(actix_web::ResponseError::status_code(self))
            .json(self.to_body())
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
