//! Per-feature batch composers.
//!
//! A composer is a pure function from `(document snapshot, inputs)` to an
//! ordered request list. Input validation is split out so the editor can run
//! it before any remote call, and every position is computed against the one
//! snapshot the editor hands over.

mod list;
mod media;
mod named_range;
mod segment;
mod table;
mod tab;
mod text;

pub use list::{AddList, RemoveList};
pub use media::{AddFootnote, InsertImage, InsertPageBreak};
pub use named_range::{CreateNamedRange, DeleteNamedRange, NamedRangeSelector, ReplaceNamedRange};
pub use segment::{CreateSegment, DeleteSegment, SegmentKind};
pub use tab::{AddTab, DeleteTab, RenameTab};
pub use table::{
    AddTable, BorderEdge, CellStyle, CellTarget, ColumnWidth, MergeCells, PinHeaderRows,
    RowHeight, TableEdit, TableEditKind,
};
pub use text::{Append, DeleteRange, Insert, ReplaceAll, StyleParagraph, StyleText};

use crate::document::Document;
use crate::error::{DocsError, Result};
use crate::operation::{EndOfSegmentLocation, Location, Reply, Request, RgbColor};

/// Key/value result handed to the printer.
pub type ResultMap = serde_json::Map<String, serde_json::Value>;

/// What a composer gets to work with once the tab has been resolved.
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    /// Present when the composer asked for a snapshot or a tab had to be resolved.
    pub document: Option<&'a Document>,
    /// Resolved tab ID; empty means the default tab.
    pub tab_id: &'a str,
}

impl<'a> EditContext<'a> {
    pub fn new(document: Option<&'a Document>, tab_id: &'a str) -> Self {
        Self { document, tab_id }
    }

    pub fn snapshot(&self) -> Result<&'a Document> {
        self.document
            .ok_or_else(|| DocsError::Unsupported("this edit needs a document snapshot".into()))
    }
}

pub trait Composer {
    /// Short description of the edit, used as `failed to <intent>: ...`.
    fn intent(&self) -> &'static str;

    /// Local checks on the inputs. Must not depend on the document.
    fn validate(&self) -> Result<()>;

    /// Whether positions depend on the current document content.
    fn needs_snapshot(&self) -> bool {
        false
    }

    /// Whether the tab flags apply to this edit.
    fn uses_tab(&self) -> bool {
        true
    }

    /// Whether a tab must be selected explicitly.
    fn requires_tab(&self) -> bool {
        false
    }

    /// Inputs that will be ignored and that the user should hear about.
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>>;

    /// Copy identifiers or counters out of the replies.
    fn report(&self, _replies: &[Reply], _out: &mut ResultMap) {}
}

pub(crate) fn validate_position(flag: &str, value: i64) -> Result<()> {
    if value < 1 {
        return Err(DocsError::Validation(format!(
            "--{} must be >= 1, got {}",
            flag, value
        )));
    }
    Ok(())
}

pub(crate) fn validate_range(from: i64, to: i64) -> Result<()> {
    validate_position("from", from)?;
    if to <= from {
        return Err(DocsError::Validation(format!(
            "--to ({}) must be greater than --from ({})",
            to, from
        )));
    }
    Ok(())
}

pub(crate) fn require_text(flag: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DocsError::Validation(format!("--{} must not be empty", flag)));
    }
    Ok(())
}

/// `Some(index)` anchors at a position, `None` at the end of the segment.
pub(crate) fn anchor(
    at: Option<i64>,
    tab_id: &str,
) -> (Option<Location>, Option<EndOfSegmentLocation>) {
    match at {
        Some(index) => (Some(Location::new(index, tab_id)), None),
        None => (None, Some(EndOfSegmentLocation::new(tab_id))),
    }
}

/// Parse `#RRGGBB` (the `#` is optional) into unit-range components.
pub fn parse_hex_color(value: &str) -> Result<RgbColor> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    let invalid = || DocsError::Validation(format!("invalid color {:?}, expected #RRGGBB", value));

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| invalid())
    };

    Ok(RgbColor {
        red: channel(0)?,
        green: channel(2)?,
        blue: channel(4)?,
    })
}
