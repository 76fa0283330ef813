//! Tab tree flattening and tab selection.
//!
//! A user can point at a tab by ID, by title, or by its position in the
//! pre-order flattened list. Resolution only walks top-down, so tabs keep no
//! parent back-pointers.

use tracing::debug;

use crate::document::Tab;
use crate::error::{DocsError, Result};

/// Flatten a tab tree in pre-order: each tab precedes its descendants,
/// siblings keep their original order.
pub fn flatten_tabs(tabs: &[Tab]) -> Vec<&Tab> {
    let mut out = Vec::new();
    let mut stack: Vec<&Tab> = tabs.iter().rev().collect();
    while let Some(tab) = stack.pop() {
        out.push(tab);
        stack.extend(tab.child_tabs.iter().rev());
    }
    out
}

/// Resolve a query to a single tab ID.
///
/// An exact ID match wins outright. Otherwise titles are compared
/// case-insensitively and exactly one tab must match.
pub fn resolve_tab(tabs: &[Tab], query: &str) -> Result<String> {
    let flat = flatten_tabs(tabs);

    if let Some(tab) = flat.iter().find(|t| t.id() == query) {
        return Ok(tab.id().to_string());
    }

    let wanted = query.to_lowercase();
    let matches: Vec<&&Tab> = flat
        .iter()
        .filter(|t| t.title().to_lowercase() == wanted)
        .collect();

    match matches.as_slice() {
        [] => Err(DocsError::NotFound(format!(
            "no tab found matching {:?}",
            query
        ))),
        [tab] => {
            debug!("Resolved tab title {:?} to {}", query, tab.id());
            Ok(tab.id().to_string())
        }
        _ => Err(DocsError::Ambiguous(format!(
            "multiple tabs match title {:?}; use tab ID instead",
            query
        ))),
    }
}

/// Resolve the `--tab` / `--tab-index` pair against a document's tabs.
///
/// Returns an empty string when neither is supplied, meaning "default tab".
pub fn resolve_target(tab_query: &str, tab_index: Option<usize>, tabs: &[Tab]) -> Result<String> {
    if !tab_query.is_empty() && tab_index.is_some() {
        return Err(DocsError::ConflictingFlags);
    }

    if let Some(index) = tab_index {
        if tabs.is_empty() {
            return Err(DocsError::NoTabs);
        }
        let flat = flatten_tabs(tabs);
        return flat
            .get(index)
            .map(|t| t.id().to_string())
            .ok_or(DocsError::IndexOutOfRange {
                index,
                count: flat.len(),
            });
    }

    if !tab_query.is_empty() {
        if tabs.is_empty() {
            return Err(DocsError::NoTabs);
        }
        return resolve_tab(tabs, tab_query);
    }

    Ok(String::new())
}

/// The user's tab selection, as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabTarget {
    pub query: String,
    pub index: Option<usize>,
}

impl TabTarget {
    pub fn new(query: Option<String>, index: Option<usize>) -> Self {
        Self {
            query: query.unwrap_or_default(),
            index,
        }
    }

    pub fn by_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            index: None,
        }
    }

    pub fn by_index(index: usize) -> Self {
        Self {
            query: String::new(),
            index: Some(index),
        }
    }

    /// No tab flag given.
    pub fn is_default(&self) -> bool {
        self.query.is_empty() && self.index.is_none()
    }

    /// Flag-combination check that needs no document.
    pub fn validate(&self) -> Result<()> {
        if !self.query.is_empty() && self.index.is_some() {
            return Err(DocsError::ConflictingFlags);
        }
        Ok(())
    }

    pub fn resolve(&self, tabs: &[Tab]) -> Result<String> {
        resolve_target(&self.query, self.index, tabs)
    }
}
