pub mod content_client;
pub mod payload;
pub mod predict_client;

use crate::{
    config::GoogleConfig,
    error::{ProxyError, Result},
    models::{GenerateRequest, GenerateResponse, TestGenerateReport, StylizeRequest},
    provider::ImageProvider,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub use content_client::ContentClient;
pub use predict_client::PredictClient;

const API_KEY_HEADER: &str = "x-goog-api-key";
const TEST_PROMPT: &str = "a simple red circle";

/// Shared HTTP plumbing: one pooled client, the API base and the key.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl Transport {
    pub fn new(http: reqwest::Client, api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            api_key,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn require_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(ProxyError::MissingCredential)
    }

    /// POSTs `body` as JSON. Anything but a 200 becomes [`ProxyError::Upstream`].
    pub async fn post_json<B>(&self, url: &str, body: &B, timeout: Duration) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let api_key = self.require_key()?;

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Upstream request to {} failed: {}", url, e);
                ProxyError::Http(e)
            })?;

        let status = response.status();
        let text = response.text().await?;
        log::debug!("Upstream {} responded {} ({} bytes)", url, status, text.len());

        if status != StatusCode::OK {
            log::error!("Upstream {} returned {}", url, status);
            return Err(ProxyError::upstream(status.as_u16(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Client for the Imagen and Gemini image endpoints.
#[derive(Clone)]
pub struct GoogleClient {
    transport: Transport,
    predict_client: PredictClient,
    content_client: ContentClient,
    default_model: String,
    test_generate_timeout: Duration,
}

impl GoogleClient {
    pub fn new(config: &GoogleConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, config))
    }

    pub fn with_http(http: reqwest::Client, config: &GoogleConfig) -> Self {
        let transport = Transport::new(http, config.api_base.clone(), config.api_key.clone());
        Self {
            predict_client: PredictClient::new(transport.clone(), config.predict_timeout),
            content_client: ContentClient::new(
                transport.clone(),
                config.stylize_model.clone(),
                config.content_timeout,
            ),
            transport,
            default_model: config.default_model.clone(),
            test_generate_timeout: config.test_generate_timeout,
        }
    }
}

#[async_trait]
impl ImageProvider for GoogleClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        request.validate()?;
        self.transport.require_key()?;
        self.predict_client.generate(&request, None).await
    }

    async fn stylize(&self, request: StylizeRequest) -> Result<GenerateResponse> {
        request.params.validate()?;
        if request.image.is_empty() {
            return Err(ProxyError::BadRequest("uploaded image is empty".into()));
        }
        self.transport.require_key()?;

        let image_base64 = STANDARD.encode(&request.image);

        match self.content_client.edit(&request, image_base64.clone()).await {
            Err(e) if e.indicates_unsupported() => {
                log::warn!(
                    "{} rejected the multimodal edit, falling back to predict on {}",
                    self.content_client.model(),
                    request.params.model
                );
                self.predict_client
                    .generate(&request.params, Some(image_base64))
                    .await
            }
            other => other,
        }
    }

    async fn test_generate(&self) -> TestGenerateReport {
        let request = GenerateRequest::new(TEST_PROMPT).with_model(self.default_model.clone());

        match self
            .predict_client
            .predict(&request, None, self.test_generate_timeout)
            .await
        {
            Ok(Value::Object(map)) => TestGenerateReport::Success {
                response_keys: map.keys().cloned().collect(),
            },
            Ok(_) => TestGenerateReport::Success {
                response_keys: Vec::new(),
            },
            Err(ProxyError::Upstream { status, detail }) => {
                let detail = match detail {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                TestGenerateReport::Failed {
                    error: format!(
                        "API returned {}: {}",
                        status,
                        detail.chars().take(200).collect::<String>()
                    ),
                }
            }
            Err(e) => TestGenerateReport::Failed {
                error: e.to_string(),
            },
        }
    }
}
