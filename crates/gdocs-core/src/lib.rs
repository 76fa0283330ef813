//! Tab resolution and batch edit building for tabbed documents.
//!
//! This crate turns editing commands into ordered batches of index-addressed
//! requests:
//! - `tabs` / `body`: pick a tab in a nested tab tree and the body to edit
//! - `content`: plaintext, markdown and richformat input to requests
//! - `compose`: one composer per editing feature
//! - `service`: the remote transport seam and the batch submitter
//! - `editor`: validate, fetch, resolve, compose and submit in one call

mod batch;
mod body;
pub mod compose;
mod content;
mod document;
mod editor;
mod error;
mod operation;
mod service;
mod tabs;

pub use batch::BatchBuilder;
pub use body::locate_body;
pub use content::{build_content_requests, parse_richformat, text_len, ContentFormat};
pub use document::{Body, Document, DocumentTab, StructuralElement, Tab, TabProperties};
pub use editor::DocsEditor;
pub use error::{DocsError, Result};
pub use operation::*;
pub use service::{reply_at, submit, DocumentService};
pub use tabs::{flatten_tabs, resolve_tab, resolve_target, TabTarget};
