use serde_json::Value;

/// Field names (lowercased) whose string value is an image payload.
const IMAGE_FIELDS: &[&str] = &[
    "imagebytes",
    "bytesbase64",
    "image_base64",
    "imagebytesbase64",
    "bytesbase64encoded",
];

/// Multimodal parts wrap the payload as `{ inline_data: { data: ... } }`.
const INLINE_FIELDS: &[&str] = &["inline_data", "inlinedata"];

/// Walks `value` depth-first and returns every raw candidate string in document order.
///
/// Nothing is filtered here; see [`super::finalize`].
pub fn collect_candidates(value: &Value) -> Vec<String> {
    let mut found = Vec::new();
    walk(value, &mut found);
    found
}

fn walk(value: &Value, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key = key.to_lowercase();
                if IMAGE_FIELDS.contains(&key.as_str()) {
                    if let Value::String(s) = child {
                        found.push(s.clone());
                    }
                }
                if INLINE_FIELDS.contains(&key.as_str()) {
                    if let Some(Value::String(s)) = child.get("data") {
                        found.push(s.clone());
                    }
                }
                if child.is_object() || child.is_array() {
                    walk(child, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, found);
            }
        }
        _ => {}
    }
}
