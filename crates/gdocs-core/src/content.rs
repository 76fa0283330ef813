//! Turns user-authored content into insert requests.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{DocsError, Result};
use crate::operation::{Location, Request};

/// How the text handed to a content command should be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentFormat {
    Markdown,
    #[default]
    Plaintext,
    /// The text is itself a serialized list of requests.
    Richformat,
}

impl ContentFormat {
    pub fn is_richformat(self) -> bool {
        self == ContentFormat::Richformat
    }
}

impl FromStr for ContentFormat {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "markdown" => Ok(ContentFormat::Markdown),
            "plaintext" => Ok(ContentFormat::Plaintext),
            "richformat" => Ok(ContentFormat::Richformat),
            other => Err(DocsError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContentFormat::Markdown => "markdown",
            ContentFormat::Plaintext => "plaintext",
            ContentFormat::Richformat => "richformat",
        })
    }
}

/// Parse a richformat batch: either a JSON array of requests or a
/// `{"requests": [...]}` batch body.
pub fn parse_richformat(text: &str) -> Result<Vec<Request>> {
    #[derive(Deserialize)]
    struct BatchBody {
        requests: Vec<Request>,
    }

    // Parse as a plain value first so syntax errors keep serde's position info.
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| DocsError::Parse(e.to_string()))?;

    let requests = if value.is_array() {
        serde_json::from_value::<Vec<Request>>(value)
    } else if value.get("requests").is_some() {
        serde_json::from_value::<BatchBody>(value).map(|b| b.requests)
    } else {
        return Err(DocsError::Parse(
            "expected a JSON array of requests or an object with a \"requests\" array".into(),
        ));
    }
    .map_err(|e| DocsError::Parse(e.to_string()))?;

    if requests.is_empty() {
        return Err(DocsError::Parse("no requests found".into()));
    }
    Ok(requests)
}

/// Build the requests that place `text` at `insert_index` in `tab_id`.
///
/// Markdown and plaintext are inserted literally as a single request; any
/// markup rendering happens elsewhere. Richformat ignores `insert_index` and
/// `tab_id` and returns the parsed requests unchanged.
pub fn build_content_requests(
    text: &str,
    format: ContentFormat,
    insert_index: i64,
    tab_id: &str,
) -> Result<Vec<Request>> {
    match format {
        ContentFormat::Richformat => parse_richformat(text),
        ContentFormat::Markdown | ContentFormat::Plaintext => Ok(vec![Request::insert_text(
            text,
            Location::new(insert_index, tab_id),
        )]),
    }
}

/// Length of `text` in the units the service counts positions in (UTF-16).
pub fn text_len(text: &str) -> i64 {
    text.encode_utf16().count() as i64
}
