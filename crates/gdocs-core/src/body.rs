//! Picks the body an edit is anchored to.
//!
//! Not every fetch populates per-tab content, so a document without a tab
//! tree falls back to its legacy body, but only when no tab was asked for.

use crate::document::{Body, Document};
use crate::error::{DocsError, Result};
use crate::tabs::flatten_tabs;

/// Return the body for `tab_id`, or for the first tab when `tab_id` is empty.
pub fn locate_body<'a>(document: &'a Document, tab_id: &str) -> Result<&'a Body> {
    if document.has_tabs() {
        let flat = flatten_tabs(&document.tabs);

        if tab_id.is_empty() {
            let first = flat
                .first()
                .ok_or_else(|| DocsError::NoContent("document has no tabs".into()))?;
            return first.body().ok_or_else(|| {
                DocsError::NoContent(format!("tab {} has no content loaded", first.id()))
            });
        }

        let tab = flat
            .iter()
            .find(|t| t.id() == tab_id)
            .ok_or_else(|| DocsError::NotFound(format!("tab not found: {}", tab_id)))?;
        return tab
            .body()
            .ok_or_else(|| DocsError::NoContent(format!("tab {} has no content loaded", tab_id)));
    }

    if !tab_id.is_empty() {
        return Err(DocsError::Unsupported(
            "tab data not available; re-fetch with full content".into(),
        ));
    }

    document
        .body
        .as_ref()
        .ok_or_else(|| DocsError::NoContent("document has no body".into()))
}
