//! Read-only document snapshot as returned by the documents endpoint.
//!
//! Only the parts needed to anchor edits are modeled: the tab tree and the
//! start/end offsets of each content block. Everything else in the payload is
//! ignored on deserialization.

use serde::{Deserialize, Serialize};

/// A fetched document. Never mutated; edits go through [`crate::Request`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub title: String,
    /// Empty for legacy single-body documents or when tab content was not requested.
    #[serde(default)]
    pub tabs: Vec<Tab>,
    /// Legacy single body, populated only when tabs are not.
    #[serde(default)]
    pub body: Option<Body>,
}

impl Document {
    pub fn has_tabs(&self) -> bool {
        !self.tabs.is_empty()
    }
}

/// A named sub-document, possibly with nested child tabs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    #[serde(default)]
    pub tab_properties: TabProperties,
    #[serde(default)]
    pub child_tabs: Vec<Tab>,
    #[serde(default)]
    pub document_tab: Option<DocumentTab>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabProperties {
    #[serde(default)]
    pub tab_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub index: i64,
    #[serde(default)]
    pub nesting_level: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_tab_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTab {
    #[serde(default)]
    pub body: Option<Body>,
}

/// Ordered content blocks of a tab or of a legacy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// One content block (paragraph, table, section break, ...).
///
/// Block internals are opaque; only the offsets are kept. The leading
/// section break carries no `startIndex`, which defaults to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralElement {
    #[serde(default)]
    pub start_index: i64,
    #[serde(default)]
    pub end_index: i64,
}

impl Tab {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            tab_properties: TabProperties {
                tab_id: id.into(),
                title: title.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Tab>) -> Self {
        self.child_tabs = children;
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.document_tab = Some(DocumentTab { body: Some(body) });
        self
    }

    pub fn id(&self) -> &str {
        &self.tab_properties.tab_id
    }

    pub fn title(&self) -> &str {
        &self.tab_properties.title
    }

    /// Body of the tab, if its content was included in the fetch.
    pub fn body(&self) -> Option<&Body> {
        self.document_tab.as_ref().and_then(|t| t.body.as_ref())
    }
}

impl Body {
    /// Build a body from `(start, end)` offsets.
    pub fn from_offsets(offsets: &[(i64, i64)]) -> Self {
        Self {
            content: offsets
                .iter()
                .map(|&(start_index, end_index)| StructuralElement {
                    start_index,
                    end_index,
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Index just before the trailing newline of the last block, where
    /// appended text lands. `None` when the body has no blocks.
    pub fn append_index(&self) -> Option<i64> {
        self.content.last().map(|block| block.end_index - 1)
    }
}
