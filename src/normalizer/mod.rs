//! Pulls base64 image payloads out of upstream responses.
//!
//! Imagen and Gemini wrap their image bytes in a dozen different shapes depending on
//! model, API version and SDK. Rather than deserializing each one, the normalizer walks
//! the raw JSON tree and keeps any string found under a known image-bearing field.

pub mod scan;
pub mod summary;

pub use scan::collect_candidates;
pub use summary::summarize;

use serde_json::Value;
use std::collections::HashSet;

/// Strings shorter than this are treated as captions or ids, not image data.
pub const MIN_IMAGE_CHARS: usize = 128;
pub const MAX_RESULTS: usize = 4;

/// Top-level wrappers used by the various predict response flavours.
const PREDICT_ROOTS: &[&str] = &["predictions", "generatedImages", "generated_images", "response"];

/// Trims, drops short strings, dedupes in first-seen order and caps the result.
pub fn finalize<I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for candidate in candidates {
        let trimmed = candidate.trim();
        if trimmed.chars().count() < MIN_IMAGE_CHARS {
            continue;
        }
        if !seen.insert(trimmed.to_string()) {
            continue;
        }
        out.push(trimmed.to_string());
        if out.len() == MAX_RESULTS {
            break;
        }
    }
    out
}

/// Images from a `:predict` style response.
pub fn extract_images(response: &Value) -> Vec<String> {
    let mut candidates = collect_candidates(response);
    for root in PREDICT_ROOTS {
        if let Some(inner) = response.get(*root) {
            candidates.extend(collect_candidates(inner));
        }
    }
    finalize(candidates)
}

/// Images from a `:generateContent` response.
///
/// Candidate parts are scanned first; the whole document is only walked when they
/// carry nothing.
pub fn extract_content_images(response: &Value) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(Value::Array(items)) = response.get("candidates") {
        for candidate in items {
            if let Some(parts) = candidate.get("content").and_then(|c| c.get("parts")) {
                if parts.is_array() {
                    candidates.extend(collect_candidates(parts));
                }
            }
        }
    }

    let images = finalize(candidates);
    if images.is_empty() {
        finalize(collect_candidates(response))
    } else {
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn b64(seed: char, len: usize) -> String {
        std::iter::repeat(seed).take(len).collect()
    }

    #[test]
    fn test_predictions_shape() {
        let img = b64('A', 260);
        let doc = json!({"predictions": [{"bytesBase64Encoded": img, "mimeType": "image/png"}]});
        assert_eq!(extract_images(&doc), vec![img]);
    }

    #[test]
    fn test_generated_images_shape() {
        let img = b64('B', 300);
        let doc = json!({"generatedImages": [{"image": {"imageBytes": img}}]});
        assert_eq!(extract_images(&doc), vec![img]);
    }

    #[test]
    fn test_nested_response_wrapper() {
        let img = b64('C', 200);
        let doc = json!({"response": {"generated_images": [{"image": {"image_bytes_base64": "x", "imageBytesBase64": img}}]}});
        assert_eq!(extract_images(&doc), vec![img]);
    }

    #[test]
    fn test_short_strings_never_returned() {
        let doc = json!({"predictions": [
            {"bytesBase64Encoded": b64('s', MIN_IMAGE_CHARS - 1)},
            {"bytesBase64Encoded": format!("   {}   ", b64('t', 100))}
        ]});
        assert!(extract_images(&doc).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive_and_whitespace_trimmed() {
        let img = b64('k', MIN_IMAGE_CHARS);
        let doc = json!({"imageBytes": format!("\n {} \t", img)});
        assert_eq!(extract_images(&doc), vec![img]);
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        let a = b64('a', 150);
        let b = b64('b', 150);
        let doc = json!({"predictions": [
            {"bytesBase64Encoded": b.clone()},
            {"bytesBase64Encoded": a.clone()},
            {"bytesBase64Encoded": b.clone()},
            {"imageBytes": format!(" {}", a)}
        ]});
        assert_eq!(extract_images(&doc), vec![b, a]);
    }

    #[test]
    fn test_results_capped_at_four() {
        let predictions: Vec<Value> = "abcdefg"
            .chars()
            .map(|c| json!({"bytesBase64Encoded": b64(c, 140)}))
            .collect();
        let images = extract_images(&json!({ "predictions": predictions }));
        assert_eq!(images.len(), MAX_RESULTS);
        assert_eq!(images[0], b64('a', 140));
        assert_eq!(images[3], b64('d', 140));
    }

    #[test]
    fn test_no_candidates() {
        let doc = json!({"predictions": [], "error": {"message": "quota"}});
        assert!(extract_images(&doc).is_empty());
        assert!(extract_images(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn test_content_candidates_parts() {
        let img = b64('G', 500);
        let doc = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "Here is your stylized photo"},
                    {"inlineData": {"mimeType": "image/png", "data": img}}
                ]}
            }],
            "usageMetadata": {"promptTokenCount": 10}
        });
        assert_eq!(extract_content_images(&doc), vec![img]);
    }

    #[test]
    fn test_content_falls_back_to_whole_document() {
        let img = b64('H', 256);
        let doc = json!({"candidates": [{"content": {"parts": [{"text": "no image"}]}}],
                         "extra": {"inline_data": {"data": img}}});
        assert_eq!(extract_content_images(&doc), vec![img]);
    }

    #[test]
    fn test_content_without_images() {
        let doc = json!({"candidates": [{"finishReason": "SAFETY"}]});
        assert!(extract_content_images(&doc).is_empty());
    }
}
