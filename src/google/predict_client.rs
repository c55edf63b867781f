use super::{payload, Transport};
use crate::{
    error::{ProxyError, Result},
    models::{GenerateRequest, GenerateResponse},
    normalizer,
};
use serde_json::Value;
use std::time::Duration;

/// Imagen `:predict` calls.
#[derive(Clone)]
pub struct PredictClient {
    transport: Transport,
    timeout: Duration,
}

impl PredictClient {
    pub fn new(transport: Transport, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Raw predict call; `image_base64` makes it an image-conditioned edit.
    pub async fn predict(
        &self,
        request: &GenerateRequest,
        image_base64: Option<String>,
        timeout: Duration,
    ) -> Result<Value> {
        let url = payload::predict_url(self.transport.api_base(), &request.model);
        let body = payload::predict_payload(request, image_base64);

        log::info!(
            "Calling predict on model {} ({} image(s), conditioned: {})",
            request.model,
            request.number_of_images,
            body.instances.iter().any(|i| i.image.is_some())
        );

        self.transport.post_json(&url, &body, timeout).await
    }

    pub async fn generate(
        &self,
        request: &GenerateRequest,
        image_base64: Option<String>,
    ) -> Result<GenerateResponse> {
        let data = self.predict(request, image_base64, self.timeout).await?;
        let images = normalizer::extract_images(&data);

        if images.is_empty() {
            log::warn!("Predict response for {} carried no images", request.model);
            return Err(ProxyError::NoImagesFound {
                preview: normalizer::summarize(&data),
            });
        }

        log::info!("Extracted {} image(s) from predict response", images.len());
        Ok(GenerateResponse::from_base64(images))
    }
}
