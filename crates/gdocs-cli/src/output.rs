//! Result and error printing.

use clap::ValueEnum;
use gdocs_core::compose::ResultMap;
use gdocs_core::DocsError;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Error code for anything that is not a [`DocsError`] (I/O, bad config).
const GENERIC_ERROR_CODE: &str = "ERROR";

pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<DocsError>()
        .map(DocsError::code)
        .unwrap_or(GENERIC_ERROR_CODE)
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn key_values(map: &serde_json::Map<String, Value>) -> String {
    map.iter()
        .map(|(k, v)| format!("{}={}", k, scalar(v)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_text(map: &ResultMap) -> String {
    let mut lines = Vec::new();
    for (key, value) in map {
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                lines.push(format!("{}:", key));
                for item in items.iter().filter_map(Value::as_object) {
                    lines.push(format!("  {}", key_values(item)));
                }
            }
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(scalar).collect();
                lines.push(format!("{}: {}", key, joined.join(", ")));
            }
            Value::Object(inner) => lines.push(format!("{}: {}", key, key_values(inner))),
            other => lines.push(format!("{}: {}", key, scalar(other))),
        }
    }
    lines.join("\n")
}

pub fn render(map: &ResultMap, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(map).unwrap_or_else(|_| format!("{:?}", map))
        }
        OutputFormat::Text => render_text(map),
    }
}

pub fn render_error(err: &anyhow::Error, format: OutputFormat) -> String {
    let message = format!("{:#}", err);
    let code = error_code(err);
    match format {
        OutputFormat::Json => {
            let body = json!({"status": "error", "error": message, "code": code});
            serde_json::to_string_pretty(&body).unwrap_or(message)
        }
        OutputFormat::Text => format!("error [{}]: {}", code, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result() -> ResultMap {
        let mut map = ResultMap::new();
        map.insert("status".into(), json!("ok"));
        map.insert("document_id".into(), json!("doc-1"));
        map.insert("requests".into(), json!(2));
        map
    }

    #[test]
    fn test_render_text_scalars() {
        assert_eq!(
            render(&result(), OutputFormat::Text),
            "status: ok\ndocument_id: doc-1\nrequests: 2"
        );
    }

    #[test]
    fn test_render_text_rows_and_lists() {
        let mut map = ResultMap::new();
        map.insert(
            "tabs".into(),
            json!([{"id": "t.0", "title": "Main"}, {"id": "t.1", "title": "Notes"}]),
        );
        map.insert("warnings".into(), json!(["a", "b"]));
        assert_eq!(
            render(&map, OutputFormat::Text),
            "tabs:\n  id=t.0 title=Main\n  id=t.1 title=Notes\nwarnings: a, b"
        );
    }

    #[test]
    fn test_render_json_round_trips() {
        let out = render(&result(), OutputFormat::Json);
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["requests"], json!(2));
    }

    #[test]
    fn test_render_error_carries_code() {
        let err = anyhow::Error::from(DocsError::ConflictingFlags);
        let parsed: Value = serde_json::from_str(&render_error(&err, OutputFormat::Json)).unwrap();
        assert_eq!(parsed["status"], json!("error"));
        assert_eq!(parsed["code"], json!("CONFLICTING_FLAGS"));
        assert_eq!(
            parsed["error"],
            json!("--tab and --tab-index cannot be used together")
        );

        let io = anyhow::anyhow!("disk on fire");
        assert_eq!(
            render_error(&io, OutputFormat::Text),
            "error [ERROR]: disk on fire"
        );
    }
}
