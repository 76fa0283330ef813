use serde_json::json;

use super::{require_text, validate_range, Composer, EditContext, ResultMap};
use crate::error::{DocsError, Result};
use crate::operation::{Range, Reply, Request, TabsCriteria};

/// Names are not unique; IDs are. Exactly one of the two identifies a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedRangeSelector {
    Name(String),
    Id(String),
}

impl NamedRangeSelector {
    pub fn from_flags(name: Option<String>, id: Option<String>) -> Result<Self> {
        let name = name.filter(|n| !n.trim().is_empty());
        let id = id.filter(|i| !i.trim().is_empty());
        match (name, id) {
            (Some(name), None) => Ok(NamedRangeSelector::Name(name)),
            (None, Some(id)) => Ok(NamedRangeSelector::Id(id)),
            (Some(_), Some(_)) => Err(DocsError::AmbiguousSelector(
                "give either --name or --id, not both".into(),
            )),
            (None, None) => Err(DocsError::AmbiguousSelector(
                "one of --name or --id is required".into(),
            )),
        }
    }

    fn split(&self) -> (Option<String>, Option<String>) {
        match self {
            NamedRangeSelector::Name(name) => (Some(name.clone()), None),
            NamedRangeSelector::Id(id) => (None, Some(id.clone())),
        }
    }
}

/// Label `[from, to)` with a name.
#[derive(Debug, Clone)]
pub struct CreateNamedRange {
    pub name: String,
    pub from: i64,
    pub to: i64,
}

impl Composer for CreateNamedRange {
    fn intent(&self) -> &'static str {
        "create named range"
    }

    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        validate_range(self.from, self.to)
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::CreateNamedRange {
            name: self.name.clone(),
            range: Range::new(self.from, self.to, ctx.tab_id),
        }])
    }

    fn report(&self, replies: &[Reply], out: &mut ResultMap) {
        if let Some(reply) = replies.first().and_then(|r| r.create_named_range.as_ref()) {
            out.insert("named_range_id".into(), json!(reply.named_range_id));
        }
    }
}

/// Remove named ranges. The text they cover is left alone.
#[derive(Debug, Clone)]
pub struct DeleteNamedRange {
    /// Raw `--name` flag.
    pub name: Option<String>,
    /// Raw `--id` flag.
    pub id: Option<String>,
}

impl DeleteNamedRange {
    fn selector(&self) -> Result<NamedRangeSelector> {
        NamedRangeSelector::from_flags(self.name.clone(), self.id.clone())
    }
}

impl Composer for DeleteNamedRange {
    fn intent(&self) -> &'static str {
        "delete named range"
    }

    fn validate(&self) -> Result<()> {
        self.selector().map(|_| ())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let (name, named_range_id) = self.selector()?.split();
        Ok(vec![Request::DeleteNamedRange {
            named_range_id,
            name,
            tabs_criteria: TabsCriteria::for_tab(ctx.tab_id),
        }])
    }
}

/// Replace the content of named ranges with `text`.
#[derive(Debug, Clone)]
pub struct ReplaceNamedRange {
    pub name: Option<String>,
    pub id: Option<String>,
    pub text: String,
}

impl ReplaceNamedRange {
    fn selector(&self) -> Result<NamedRangeSelector> {
        NamedRangeSelector::from_flags(self.name.clone(), self.id.clone())
    }
}

impl Composer for ReplaceNamedRange {
    fn intent(&self) -> &'static str {
        "replace named range content"
    }

    fn validate(&self) -> Result<()> {
        self.selector().map(|_| ())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let (named_range_name, named_range_id) = self.selector()?.split();
        Ok(vec![Request::ReplaceNamedRangeContent {
            text: self.text.clone(),
            named_range_id,
            named_range_name,
            tabs_criteria: TabsCriteria::for_tab(ctx.tab_id),
        }])
    }
}
