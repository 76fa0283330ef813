use serde_json::json;

use super::{require_text, Composer, EditContext, ResultMap};
use crate::error::Result;
use crate::operation::{Location, Reply, Request};

const DEFAULT_SEGMENT_TYPE: &str = "DEFAULT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Header,
    Footer,
}

impl SegmentKind {
    fn id_key(self) -> &'static str {
        match self {
            SegmentKind::Header => "header_id",
            SegmentKind::Footer => "footer_id",
        }
    }
}

/// Create the default header or footer.
#[derive(Debug, Clone)]
pub struct CreateSegment {
    pub kind: SegmentKind,
}

impl Composer for CreateSegment {
    fn intent(&self) -> &'static str {
        match self.kind {
            SegmentKind::Header => "create header",
            SegmentKind::Footer => "create footer",
        }
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        // Only the tab's first section can be addressed without a snapshot.
        let section_break_location = (!ctx.tab_id.is_empty()).then(|| Location::new(0, ctx.tab_id));
        let kind = DEFAULT_SEGMENT_TYPE.to_string();
        Ok(vec![match self.kind {
            SegmentKind::Header => Request::CreateHeader {
                kind,
                section_break_location,
            },
            SegmentKind::Footer => Request::CreateFooter {
                kind,
                section_break_location,
            },
        }])
    }

    fn report(&self, replies: &[Reply], out: &mut ResultMap) {
        let Some(reply) = replies.first() else {
            return;
        };
        let id = match self.kind {
            SegmentKind::Header => reply.create_header.as_ref().map(|r| r.header_id.clone()),
            SegmentKind::Footer => reply.create_footer.as_ref().map(|r| r.footer_id.clone()),
        };
        if let Some(id) = id {
            out.insert(self.kind.id_key().into(), json!(id));
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteSegment {
    pub kind: SegmentKind,
    pub id: String,
}

impl Composer for DeleteSegment {
    fn intent(&self) -> &'static str {
        match self.kind {
            SegmentKind::Header => "delete header",
            SegmentKind::Footer => "delete footer",
        }
    }

    fn validate(&self) -> Result<()> {
        require_text("id", &self.id)
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let tab_id = (!ctx.tab_id.is_empty()).then(|| ctx.tab_id.to_string());
        Ok(vec![match self.kind {
            SegmentKind::Header => Request::DeleteHeader {
                header_id: self.id.clone(),
                tab_id,
            },
            SegmentKind::Footer => Request::DeleteFooter {
                footer_id: self.id.clone(),
                tab_id,
            },
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::CreateFooterReply;

    #[test]
    fn test_create_header_default_tab() {
        let reqs = CreateSegment {
            kind: SegmentKind::Header,
        }
        .compose(&EditContext::new(None, ""))
        .unwrap();
        assert_eq!(
            reqs,
            vec![Request::CreateHeader {
                kind: "DEFAULT".into(),
                section_break_location: None,
            }]
        );
    }

    #[test]
    fn test_create_footer_in_tab_reports_id() {
        let create = CreateSegment {
            kind: SegmentKind::Footer,
        };
        let reqs = create.compose(&EditContext::new(None, "t.4")).unwrap();
        assert_eq!(
            reqs,
            vec![Request::CreateFooter {
                kind: "DEFAULT".into(),
                section_break_location: Some(Location::new(0, "t.4")),
            }]
        );

        let replies = vec![Reply {
            create_footer: Some(CreateFooterReply {
                footer_id: "kix.f1".into(),
            }),
            ..Default::default()
        }];
        let mut out = ResultMap::new();
        create.report(&replies, &mut out);
        assert_eq!(out["footer_id"], json!("kix.f1"));
        assert!(!out.contains_key("header_id"));
    }

    #[test]
    fn test_delete_needs_id() {
        let delete = DeleteSegment {
            kind: SegmentKind::Header,
            id: " ".into(),
        };
        assert!(delete.validate().is_err());
        assert_eq!(delete.intent(), "delete header");
    }
}
