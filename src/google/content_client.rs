use super::{payload, Transport};
use crate::{
    error::{ProxyError, Result},
    models::{GenerateResponse, StylizeRequest},
    normalizer,
};
use std::time::Duration;

/// Gemini multimodal `:generateContent` calls used for image edits.
#[derive(Clone)]
pub struct ContentClient {
    transport: Transport,
    model: String,
    timeout: Duration,
}

impl ContentClient {
    pub fn new(transport: Transport, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            transport,
            model: model.into(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn edit(&self, request: &StylizeRequest, image_base64: String) -> Result<GenerateResponse> {
        let url = payload::content_url(self.transport.api_base(), &self.model);
        let body = payload::content_payload(&request.params.prompt, &request.mime_type, image_base64);

        log::info!(
            "Calling generateContent on {} with {} ({} bytes)",
            self.model,
            request.mime_type,
            request.image.len()
        );

        let data = self.transport.post_json(&url, &body, self.timeout).await?;
        let images = normalizer::extract_content_images(&data);

        // one candidate is requested, so only the first image is returned
        match images.into_iter().next() {
            Some(image) => Ok(GenerateResponse::from_base64(vec![image])),
            None => {
                log::warn!("generateContent response from {} carried no images", self.model);
                Err(ProxyError::NoImagesFound {
                    preview: normalizer::summarize(&data),
                })
            }
        }
    }
}
