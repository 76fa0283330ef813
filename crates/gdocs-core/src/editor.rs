//! Command runner shared by every editing command.

use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

use crate::compose::{Composer, EditContext, ResultMap};
use crate::document::Document;
use crate::error::{DocsError, Result};
use crate::service::{submit, DocumentService};
use crate::tabs::{flatten_tabs, TabTarget};

/// Drives one edit: local checks, at most one fetch, one submit.
pub struct DocsEditor<S> {
    service: S,
}

impl<S: DocumentService> DocsEditor<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    async fn fetch(&self, document_id: &str) -> Result<Document> {
        self.service
            .get_document(document_id)
            .await
            .map_err(|e| e.during("fetch document"))
    }

    /// Run `composer` against `document_id`.
    ///
    /// Everything that can be checked locally is checked before the first
    /// remote call. The document is fetched only when positions depend on it
    /// or a tab flag has to be resolved, and all positions are computed
    /// against that one snapshot.
    #[instrument(skip(self, target, composer), level = "debug", fields(intent = composer.intent()))]
    pub async fn apply<C>(
        &self,
        document_id: &str,
        target: &TabTarget,
        composer: &C,
    ) -> Result<ResultMap>
    where
        C: Composer + ?Sized,
    {
        if document_id.trim().is_empty() {
            return Err(DocsError::Validation("document ID must not be empty".into()));
        }
        composer.validate()?;
        target.validate()?;
        if composer.requires_tab() && target.is_default() {
            return Err(DocsError::Validation(format!(
                "--tab or --tab-index is required to {}",
                composer.intent()
            )));
        }

        let mut warnings = composer.warnings();
        let honors_tab = composer.uses_tab();
        if !honors_tab && !target.is_default() {
            warnings.push("tab flags are ignored for richformat content".to_string());
        }
        for warning in &warnings {
            warn!("{}", warning);
        }

        let resolve_tab = honors_tab && !target.is_default();
        let snapshot = if composer.needs_snapshot() || resolve_tab {
            Some(self.fetch(document_id).await?)
        } else {
            debug!("Skipping fetch for {}", composer.intent());
            None
        };

        let tab_id = match (&snapshot, resolve_tab) {
            (Some(document), true) => target.resolve(&document.tabs)?,
            _ => String::new(),
        };

        let ctx = EditContext::new(snapshot.as_ref(), &tab_id);
        let requests = composer.compose(&ctx)?;
        let replies = submit(&self.service, document_id, &requests, composer.intent()).await?;
        info!(
            "Applied {} ({} requests) to {}",
            composer.intent(),
            requests.len(),
            document_id
        );

        let mut out = ResultMap::new();
        out.insert("status".into(), json!("ok"));
        out.insert("document_id".into(), json!(document_id));
        out.insert("requests".into(), json!(requests.len()));
        if !tab_id.is_empty() {
            out.insert("tab_id".into(), json!(tab_id));
        }
        if !warnings.is_empty() {
            out.insert("warnings".into(), json!(warnings));
        }
        composer.report(&replies, &mut out);
        Ok(out)
    }

    /// List every tab in pre-order.
    #[instrument(skip(self), level = "debug")]
    pub async fn list_tabs(&self, document_id: &str) -> Result<ResultMap> {
        if document_id.trim().is_empty() {
            return Err(DocsError::Validation("document ID must not be empty".into()));
        }
        let document = self.fetch(document_id).await?;

        let tabs: Vec<Value> = flatten_tabs(&document.tabs)
            .into_iter()
            .map(|tab| {
                json!({
                    "id": tab.id(),
                    "title": tab.title(),
                    "index": tab.tab_properties.index,
                    "nesting_level": tab.tab_properties.nesting_level,
                    "has_content": tab.body().is_some(),
                })
            })
            .collect();

        let mut out = ResultMap::new();
        out.insert("status".into(), json!("ok"));
        out.insert("document_id".into(), json!(document_id));
        out.insert("title".into(), json!(document.title));
        out.insert("count".into(), json!(tabs.len()));
        out.insert("tabs".into(), Value::Array(tabs));
        Ok(out)
    }
}
