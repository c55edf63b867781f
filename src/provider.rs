use crate::{
    error::Result,
    models::{GenerateRequest, GenerateResponse, TestGenerateReport, StylizeRequest},
};
use async_trait::async_trait;

/// Backend that turns prompts (and optionally a source image) into base64 images.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Text-to-image generation.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Image-to-image edit of an uploaded photo.
    async fn stylize(&self, request: StylizeRequest) -> Result<GenerateResponse>;

    /// Cheap connectivity check against the upstream API. Never fails; the outcome is
    /// carried in the report.
    async fn test_generate(&self) -> TestGenerateReport;
}
