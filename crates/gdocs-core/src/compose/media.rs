//! Single-request insertions: inline images, footnotes and page breaks.

use serde_json::json;

use super::{anchor, validate_position, Composer, EditContext, ResultMap};
use crate::error::{DocsError, Result};
use crate::operation::{Dimension, Reply, Request, Size};

fn validate_at(at: Option<i64>) -> Result<()> {
    match at {
        Some(index) => validate_position("at", index),
        None => Ok(()),
    }
}

/// Insert an image fetched by the service from a public URL.
#[derive(Debug, Clone)]
pub struct InsertImage {
    pub uri: String,
    pub at: Option<i64>,
    /// Points.
    pub width: Option<f64>,
    /// Points.
    pub height: Option<f64>,
}

impl InsertImage {
    fn object_size(&self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(Size {
                width: Dimension::pt(width),
                height: Dimension::pt(height),
            }),
            _ => None,
        }
    }
}

impl Composer for InsertImage {
    fn intent(&self) -> &'static str {
        "insert image"
    }

    fn validate(&self) -> Result<()> {
        if !(self.uri.starts_with("https://") || self.uri.starts_with("http://")) {
            return Err(DocsError::Validation(format!(
                "--uri must be an http or https URL, got {:?}",
                self.uri
            )));
        }
        validate_at(self.at)?;
        match (self.width, self.height) {
            (None, None) => Ok(()),
            (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => Ok(()),
            (Some(_), Some(_)) => Err(DocsError::Validation(
                "--width and --height must be positive".into(),
            )),
            _ => Err(DocsError::Validation(
                "--width and --height must be given together".into(),
            )),
        }
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let (location, end_of_segment_location) = anchor(self.at, ctx.tab_id);
        Ok(vec![Request::InsertInlineImage {
            uri: self.uri.clone(),
            object_size: self.object_size(),
            location,
            end_of_segment_location,
        }])
    }

    fn report(&self, replies: &[Reply], out: &mut ResultMap) {
        if let Some(reply) = replies.first().and_then(|r| r.insert_inline_image.as_ref()) {
            out.insert("object_id".into(), json!(reply.object_id));
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsertPageBreak {
    pub at: Option<i64>,
}

impl Composer for InsertPageBreak {
    fn intent(&self) -> &'static str {
        "insert page break"
    }

    fn validate(&self) -> Result<()> {
        validate_at(self.at)
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let (location, end_of_segment_location) = anchor(self.at, ctx.tab_id);
        Ok(vec![Request::InsertPageBreak {
            location,
            end_of_segment_location,
        }])
    }
}

#[derive(Debug, Clone)]
pub struct AddFootnote {
    pub at: Option<i64>,
}

impl Composer for AddFootnote {
    fn intent(&self) -> &'static str {
        "create footnote"
    }

    fn validate(&self) -> Result<()> {
        validate_at(self.at)
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let (location, end_of_segment_location) = anchor(self.at, ctx.tab_id);
        Ok(vec![Request::CreateFootnote {
            location,
            end_of_segment_location,
        }])
    }

    fn report(&self, replies: &[Reply], out: &mut ResultMap) {
        if let Some(reply) = replies.first().and_then(|r| r.create_footnote.as_ref()) {
            out.insert("footnote_id".into(), json!(reply.footnote_id));
        }
    }
}
