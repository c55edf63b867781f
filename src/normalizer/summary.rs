use serde_json::{Map, Value};

pub const MAX_DEPTH: usize = 2;
pub const MAX_KEYS: usize = 10;
pub const MAX_ITEMS: usize = 5;
pub const MAX_STRING_CHARS: usize = 200;
pub const ELLIPSIS: &str = "…";

/// Redacted, bounded copy of an upstream response for error previews.
///
/// Containers deeper than [`MAX_DEPTH`] collapse to `"…"`, objects keep their first
/// [`MAX_KEYS`] keys, arrays their first [`MAX_ITEMS`] items, and long strings are cut
/// to [`MAX_STRING_CHARS`] characters followed by `"…"`.
pub fn summarize(value: &Value) -> Value {
    summarize_at(value, 0)
}

fn summarize_at(value: &Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return Value::String(ELLIPSIS.to_string());
    }
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, child) in map.iter().take(MAX_KEYS) {
                out.insert(key.clone(), summarize_at(child, depth + 1));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .take(MAX_ITEMS)
                .map(|item| summarize_at(item, depth + 1))
                .collect(),
        ),
        Value::String(s) => Value::String(truncate(s)),
        other => other.clone(),
    }
}

fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_STRING_CHARS {
        let mut cut: String = s.chars().take(MAX_STRING_CHARS).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        s.to_string()
    }
}
