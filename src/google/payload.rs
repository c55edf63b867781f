use crate::models::{
    Content, GenerateContentPayload, GenerateRequest, GenerationConfig, InlineData, Part,
    PredictImage, PredictInstance, PredictParameters, PredictPayload,
};

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// `:predict` body. `image_base64` turns it into an image-conditioned call.
pub fn predict_payload(request: &GenerateRequest, image_base64: Option<String>) -> PredictPayload {
    PredictPayload {
        instances: vec![PredictInstance {
            prompt: request.prompt.clone(),
            image: image_base64.map(|bytes_base64_encoded| PredictImage {
                bytes_base64_encoded,
            }),
        }],
        parameters: PredictParameters {
            sample_count: request.number_of_images,
            aspect_ratio: non_empty(&request.aspect_ratio),
            sample_image_size: non_empty(&request.sample_image_size),
            person_generation: non_empty(&request.person_generation),
        },
    }
}

/// `:generateContent` body: the source image followed by the instruction text.
pub fn content_payload(prompt: &str, mime_type: &str, image_base64: String) -> GenerateContentPayload {
    GenerateContentPayload {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: image_base64,
                    },
                },
                Part::Text {
                    text: prompt.to_string(),
                },
            ],
        }],
        generation_config: GenerationConfig { candidate_count: 1 },
    }
}

pub fn predict_url(api_base: &str, model: &str) -> String {
    format!("{}/models/{}:predict", api_base.trim_end_matches('/'), model)
}

pub fn content_url(api_base: &str, model: &str) -> String {
    format!("{}/models/{}:generateContent", api_base.trim_end_matches('/'), model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_predict_payload() {
        let req = GenerateRequest::new("a cat");
        let body = serde_json::to_value(predict_payload(&req, None)).unwrap();
        assert_eq!(
            body,
            json!({"instances": [{"prompt": "a cat"}], "parameters": {"sampleCount": 1}})
        );
    }

    #[test]
    fn test_full_predict_payload_with_image() {
        let mut req = GenerateRequest::new("make it pop art")
            .with_number_of_images(3)
            .with_aspect_ratio("3:4");
        req.sample_image_size = Some("2K".into());
        req.person_generation = Some("allow_adult".into());

        let body = serde_json::to_value(predict_payload(&req, Some("aW1n".into()))).unwrap();
        assert_eq!(
            body,
            json!({
                "instances": [{"prompt": "make it pop art", "image": {"bytesBase64Encoded": "aW1n"}}],
                "parameters": {
                    "sampleCount": 3,
                    "aspectRatio": "3:4",
                    "sampleImageSize": "2K",
                    "personGeneration": "allow_adult"
                }
            })
        );
    }

    #[test]
    fn test_blank_optionals_are_omitted() {
        let mut req = GenerateRequest::new("x");
        req.aspect_ratio = Some("".into());
        req.person_generation = Some("  ".into());
        let body = serde_json::to_value(predict_payload(&req, None)).unwrap();
        assert_eq!(body["parameters"], json!({"sampleCount": 1}));
    }

    #[test]
    fn test_content_payload() {
        let body = serde_json::to_value(content_payload("watercolor", "image/jpeg", "Zm9v".into())).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"inline_data": {"mime_type": "image/jpeg", "data": "Zm9v"}},
                        {"text": "watercolor"}
                    ]
                }],
                "generationConfig": {"candidateCount": 1}
            })
        );
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            predict_url("https://host/v1beta/", "imagen-4.0-generate-001"),
            "https://host/v1beta/models/imagen-4.0-generate-001:predict"
        );
        assert_eq!(
            content_url("https://host/v1beta", "gemini-2.5-flash-image-preview"),
            "https://host/v1beta/models/gemini-2.5-flash-image-preview:generateContent"
        );
    }
}
