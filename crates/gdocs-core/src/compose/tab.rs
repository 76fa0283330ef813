//! Tab management. The tab flags select the tab being acted on; for
//! [`AddTab`] they select the parent.

use serde_json::json;

use super::{require_text, Composer, EditContext, ResultMap};
use crate::error::{DocsError, Result};
use crate::operation::{Reply, Request, TabPropertiesUpdate};

#[derive(Debug, Clone)]
pub struct AddTab {
    pub title: String,
    /// Zero-based position among its siblings; appended when absent.
    pub index: Option<i64>,
}

impl Composer for AddTab {
    fn intent(&self) -> &'static str {
        "add tab"
    }

    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        if let Some(index) = self.index {
            if index < 0 {
                return Err(DocsError::Validation(format!(
                    "--index must be >= 0, got {}",
                    index
                )));
            }
        }
        Ok(())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::AddDocumentTab {
            tab_properties: TabPropertiesUpdate {
                tab_id: None,
                title: Some(self.title.clone()),
                index: self.index,
                parent_tab_id: (!ctx.tab_id.is_empty()).then(|| ctx.tab_id.to_string()),
            },
        }])
    }

    fn report(&self, replies: &[Reply], out: &mut ResultMap) {
        // The editor filled `tab_id` with the parent; it only names the new tab.
        if let Some(parent) = out.remove("tab_id") {
            out.insert("parent_tab_id".into(), parent);
        }
        let Some(props) = replies
            .first()
            .and_then(|r| r.add_document_tab.as_ref())
            .map(|r| &r.tab_properties)
        else {
            return;
        };
        out.insert("tab_id".into(), json!(props.tab_id));
        if let Some(parent) = &props.parent_tab_id {
            out.insert("parent_tab_id".into(), json!(parent));
        }
    }
}

/// Delete the selected tab and its children.
#[derive(Debug, Clone, Default)]
pub struct DeleteTab;

impl Composer for DeleteTab {
    fn intent(&self) -> &'static str {
        "delete tab"
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn requires_tab(&self) -> bool {
        true
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::DeleteTab {
            tab_id: ctx.tab_id.to_string(),
        }])
    }
}

#[derive(Debug, Clone)]
pub struct RenameTab {
    pub title: String,
}

impl Composer for RenameTab {
    fn intent(&self) -> &'static str {
        "rename tab"
    }

    fn validate(&self) -> Result<()> {
        require_text("title", &self.title)
    }

    fn requires_tab(&self) -> bool {
        true
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::UpdateDocumentTabProperties {
            tab_properties: TabPropertiesUpdate {
                tab_id: Some(ctx.tab_id.to_string()),
                title: Some(self.title.clone()),
                ..Default::default()
            },
            fields: "title".into(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TabProperties;
    use crate::operation::AddDocumentTabReply;

    #[test]
    fn test_add_tab_under_parent() {
        let add = AddTab {
            title: "Notes".into(),
            index: Some(1),
        };
        let reqs = add.compose(&EditContext::new(None, "t.parent")).unwrap();
        assert_eq!(
            reqs,
            vec![Request::AddDocumentTab {
                tab_properties: TabPropertiesUpdate {
                    tab_id: None,
                    title: Some("Notes".into()),
                    index: Some(1),
                    parent_tab_id: Some("t.parent".into()),
                }
            }]
        );
        let negative = AddTab {
            title: "x".into(),
            index: Some(-1),
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_add_tab_reports_new_id() {
        let replies = vec![Reply {
            add_document_tab: Some(AddDocumentTabReply {
                tab_properties: TabProperties {
                    tab_id: "t.new".into(),
                    title: "Notes".into(),
                    ..Default::default()
                },
            }),
            ..Default::default()
        }];
        let mut out = ResultMap::new();
        out.insert("tab_id".into(), json!("t.parent"));
        AddTab {
            title: "Notes".into(),
            index: None,
        }
        .report(&replies, &mut out);
        assert_eq!(out["tab_id"], json!("t.new"));
        assert_eq!(out["parent_tab_id"], json!("t.parent"));
    }

    #[test]
    fn test_add_tab_without_reply_drops_parent_as_tab_id() {
        let mut out = ResultMap::new();
        out.insert("tab_id".into(), json!("t.parent"));
        AddTab {
            title: "Notes".into(),
            index: None,
        }
        .report(&[Reply::default()], &mut out);
        assert!(!out.contains_key("tab_id"));
        assert_eq!(out["parent_tab_id"], json!("t.parent"));

        let mut top_level = ResultMap::new();
        AddTab {
            title: "Notes".into(),
            index: None,
        }
        .report(&[], &mut top_level);
        assert!(top_level.is_empty());
    }

    #[test]
    fn test_rename_tab() {
        let rename = RenameTab {
            title: "Renamed".into(),
        };
        assert!(rename.requires_tab());
        let reqs = rename.compose(&EditContext::new(None, "t.1")).unwrap();
        match &reqs[0] {
            Request::UpdateDocumentTabProperties {
                tab_properties,
                fields,
            } => {
                assert_eq!(tab_properties.tab_id.as_deref(), Some("t.1"));
                assert_eq!(fields, "title");
            }
            other => panic!("unexpected request: {:?}", other),
        }
        assert!(RenameTab { title: "".into() }.validate().is_err());
    }
}
