use super::AppState;
use crate::{
    error::ProxyError,
    logger::RequestTimer,
    models::{DebugInfo, GenerateRequest, StylizeRequest, DEFAULT_IMAGE_MODEL},
};
use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;

#[get("/api/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[get("/api/debug")]
pub async fn debug(state: web::Data<AppState>) -> HttpResponse {
    let google = &state.config.google;
    HttpResponse::Ok().json(DebugInfo {
        status: "ok".to_string(),
        gemini_api_key_set: google.api_key.is_some(),
        gemini_key_length: google.api_key.as_deref().map_or(0, |k| k.chars().count()),
        gemini_key_preview: google.masked_key(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
    })
}

#[post("/api/test-generate")]
pub async fn test_generate(state: web::Data<AppState>) -> HttpResponse {
    let _timer = RequestTimer::new("test-generate");
    HttpResponse::Ok().json(state.provider.test_generate().await)
}

#[post("/api/generate")]
pub async fn generate(
    state: web::Data<AppState>,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, ProxyError> {
    let request = body.into_inner();
    let timer = RequestTimer::new("generate");
    log::info!("[req:{}] Generate request: {}...", timer.id(), request.prompt_preview());

    let response = state.provider.generate(request).await.map_err(|e| {
        log::error!("[req:{}] Generate failed: {}", timer.id(), e);
        e
    })?;
    Ok(HttpResponse::Ok().json(response))
}

#[derive(MultipartForm)]
pub struct StylizeForm {
    pub prompt: Text<String>,
    pub number_of_images: Option<Text<u32>>,
    pub aspect_ratio: Option<Text<String>>,
    pub sample_image_size: Option<Text<String>>,
    pub person_generation: Option<Text<String>>,
    pub model: Option<Text<String>>,
    pub image: Bytes,
}

impl StylizeForm {
    pub fn into_request(self) -> StylizeRequest {
        let params = GenerateRequest {
            prompt: self.prompt.into_inner(),
            number_of_images: self.number_of_images.map_or(1, Text::into_inner),
            aspect_ratio: self.aspect_ratio.map(Text::into_inner),
            sample_image_size: self.sample_image_size.map(Text::into_inner),
            person_generation: self.person_generation.map(Text::into_inner),
            model: self
                .model
                .map(Text::into_inner)
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        };
        let mime_type = self.image.content_type.as_ref().map(|m| m.to_string());
        StylizeRequest::new(params, self.image.data.to_vec(), mime_type)
    }
}

#[post("/api/stylize")]
pub async fn stylize(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<StylizeForm>,
) -> Result<HttpResponse, ProxyError> {
    let request = form.into_request();
    let timer = RequestTimer::new("stylize");
    log::info!(
        "[req:{}] Stylize request: {}... ({} byte upload)",
        timer.id(),
        request.params.prompt_preview(),
        request.image.len()
    );

    let response = state.provider.stylize(request).await.map_err(|e| {
        log::error!("[req:{}] Stylize failed: {}", timer.id(), e);
        e
    })?;
    Ok(HttpResponse::Ok().json(response))
}
