use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const MAX_IMAGES: u32 = 4;

fn default_number_of_images() -> u32 {
    1
}

fn default_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default = "default_number_of_images")]
    pub number_of_images: u32,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub sample_image_size: Option<String>,
    #[serde(default)]
    pub person_generation: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            number_of_images: default_number_of_images(),
            aspect_ratio: None,
            sample_image_size: None,
            person_generation: None,
            model: default_model(),
        }
    }

    pub fn with_number_of_images(mut self, n: u32) -> Self {
        self.number_of_images = n;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(aspect_ratio.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ProxyError::Validation("prompt must not be empty".into()));
        }
        if !(1..=MAX_IMAGES).contains(&self.number_of_images) {
            return Err(ProxyError::Validation(format!(
                "number_of_images must be between 1 and {}, got {}",
                MAX_IMAGES, self.number_of_images
            )));
        }
        validate_model_id(&self.model)
    }

    /// Short prompt preview for log lines.
    pub fn prompt_preview(&self) -> String {
        self.prompt.chars().take(50).collect()
    }
}

/// Model ids end up in the URL path, so only plain identifier characters are accepted.
pub fn validate_model_id(model: &str) -> Result<()> {
    let valid = !model.is_empty()
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(ProxyError::Validation(format!("invalid model identifier: {:?}", model)))
    }
}

/// Image-to-image request: generation parameters plus the uploaded source image.
#[derive(Debug, Clone)]
pub struct StylizeRequest {
    pub params: GenerateRequest,
    pub image: Vec<u8>,
    pub mime_type: String,
}

impl StylizeRequest {
    pub fn new(params: GenerateRequest, image: Vec<u8>, mime_type: Option<String>) -> Self {
        Self {
            params,
            image,
            mime_type: mime_type.unwrap_or_else(|| "image/png".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateImage {
    pub image_base64: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub images: Vec<GenerateImage>,
}

impl GenerateResponse {
    pub fn from_base64(images: Vec<String>) -> Self {
        Self {
            images: images
                .into_iter()
                .map(|image_base64| GenerateImage { image_base64 })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: GenerateRequest = serde_json::from_str(r#"{"prompt":"a cat"}"#).unwrap();
        assert_eq!(req.number_of_images, 1);
        assert_eq!(req.model, DEFAULT_IMAGE_MODEL);
        assert!(req.aspect_ratio.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_number_of_images_bounds() {
        assert!(GenerateRequest::new("x").with_number_of_images(0).validate().is_err());
        assert!(GenerateRequest::new("x").with_number_of_images(4).validate().is_ok());
        assert!(GenerateRequest::new("x").with_number_of_images(5).validate().is_err());
    }

    #[test]
    fn test_blank_prompt_rejected() {
        assert!(GenerateRequest::new("   ").validate().is_err());
    }

    #[test]
    fn test_model_id_validation() {
        assert!(validate_model_id("gemini-2.5-flash-image-preview").is_ok());
        assert!(validate_model_id("imagen-4.0-generate-001").is_ok());
        assert!(validate_model_id("").is_err());
        assert!(validate_model_id("../secrets").is_err());
        assert!(validate_model_id("model:predict?x=1").is_err());
    }

    #[test]
    fn test_prompt_preview_is_char_safe() {
        let req = GenerateRequest::new("貓".repeat(80));
        assert_eq!(req.prompt_preview().chars().count(), 50);
    }

    #[test]
    fn test_response_shape() {
        let resp = GenerateResponse::from_base64(vec!["abc".into()]);
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({"images": [{"image_base64": "abc"}]})
        );
    }
}
