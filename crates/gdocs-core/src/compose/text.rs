use serde_json::json;

use super::{require_text, validate_position, validate_range, Composer, EditContext, ResultMap};
use crate::body::locate_body;
use crate::compose::parse_hex_color;
use crate::content::{build_content_requests, parse_richformat, ContentFormat};
use crate::error::{DocsError, Result};
use crate::operation::{
    Dimension, Link, ParagraphStyle, Range, Reply, Request, SubstringMatchCriteria, TabsCriteria,
    TextStyle, WeightedFontFamily,
};
use crate::service::reply_at;

fn validate_content(text: &str, format: ContentFormat) -> Result<()> {
    if format.is_richformat() {
        // Parse errors surface before anything is fetched.
        parse_richformat(text).map(|_| ())
    } else if text.is_empty() {
        Err(DocsError::Validation("text must not be empty".into()))
    } else {
        Ok(())
    }
}

/// Add text at the end of a tab's body.
#[derive(Debug, Clone)]
pub struct Append {
    pub text: String,
    pub format: ContentFormat,
    /// Start the appended text on a new line. Never applied to richformat.
    pub newline: bool,
}

impl Composer for Append {
    fn intent(&self) -> &'static str {
        "append text"
    }

    fn validate(&self) -> Result<()> {
        validate_content(&self.text, self.format)
    }

    fn needs_snapshot(&self) -> bool {
        !self.format.is_richformat()
    }

    fn uses_tab(&self) -> bool {
        !self.format.is_richformat()
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        if self.format.is_richformat() {
            return parse_richformat(&self.text);
        }

        let body = locate_body(ctx.snapshot()?, ctx.tab_id)?;
        let index = body.append_index().ok_or(DocsError::EmptyDocument)?;

        let text = if self.newline {
            format!("\n{}", self.text)
        } else {
            self.text.clone()
        };
        build_content_requests(&text, self.format, index, ctx.tab_id)
    }
}

/// Insert text at an explicit position.
#[derive(Debug, Clone)]
pub struct Insert {
    pub text: String,
    pub format: ContentFormat,
    pub at: Option<i64>,
}

impl Composer for Insert {
    fn intent(&self) -> &'static str {
        "insert text"
    }

    fn validate(&self) -> Result<()> {
        validate_content(&self.text, self.format)?;
        if self.format.is_richformat() {
            return Ok(());
        }
        match self.at {
            Some(at) => validate_position("at", at),
            None => Err(DocsError::Validation("--at is required".into())),
        }
    }

    fn uses_tab(&self) -> bool {
        !self.format.is_richformat()
    }

    fn warnings(&self) -> Vec<String> {
        if self.format.is_richformat() && self.at.is_some() {
            vec!["--at is ignored for richformat content; positions come from the requests".into()]
        } else {
            Vec::new()
        }
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        build_content_requests(
            &self.text,
            self.format,
            self.at.unwrap_or_default(),
            ctx.tab_id,
        )
    }
}

/// Delete `[from, to)`.
#[derive(Debug, Clone)]
pub struct DeleteRange {
    pub from: i64,
    pub to: i64,
}

impl Composer for DeleteRange {
    fn intent(&self) -> &'static str {
        "delete content"
    }

    fn validate(&self) -> Result<()> {
        validate_range(self.from, self.to)
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::DeleteContentRange {
            range: Range::new(self.from, self.to, ctx.tab_id),
        }])
    }
}

/// Replace every occurrence of `find`, optionally limited to one tab.
#[derive(Debug, Clone)]
pub struct ReplaceAll {
    pub find: String,
    pub replace: String,
    pub match_case: bool,
}

impl Composer for ReplaceAll {
    fn intent(&self) -> &'static str {
        "replace text"
    }

    fn validate(&self) -> Result<()> {
        if self.find.is_empty() {
            return Err(DocsError::Validation("--find must not be empty".into()));
        }
        Ok(())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::ReplaceAllText {
            contains_text: SubstringMatchCriteria {
                text: self.find.clone(),
                match_case: self.match_case,
            },
            replace_text: self.replace.clone(),
            tabs_criteria: TabsCriteria::for_tab(ctx.tab_id),
        }])
    }

    fn report(&self, replies: &[Reply], out: &mut ResultMap) {
        let changed = reply_at(replies, 0)
            .and_then(|r| r.replace_all_text.as_ref())
            .map(|r| r.occurrences_changed)
            .unwrap_or(0);
        out.insert("replacements".into(), json!(changed));
    }
}

/// Character formatting over `[from, to)`. Unset attributes are left alone.
#[derive(Debug, Clone, Default)]
pub struct StyleText {
    pub from: i64,
    pub to: i64,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    /// Points.
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub link: Option<String>,
}

impl StyleText {
    /// The style to apply and the matching field mask.
    fn style(&self) -> Result<(TextStyle, String)> {
        let mut style = TextStyle::default();
        let mut fields: Vec<&str> = Vec::new();

        for (value, slot, name) in [
            (self.bold, &mut style.bold, "bold"),
            (self.italic, &mut style.italic, "italic"),
            (self.underline, &mut style.underline, "underline"),
            (self.strikethrough, &mut style.strikethrough, "strikethrough"),
        ] {
            if value.is_some() {
                *slot = value;
                fields.push(name);
            }
        }

        if let Some(size) = self.font_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(DocsError::Validation(format!(
                    "--font-size must be positive, got {}",
                    size
                )));
            }
            style.font_size = Some(Dimension::pt(size));
            fields.push("fontSize");
        }
        if let Some(family) = &self.font_family {
            require_text("font-family", family)?;
            style.weighted_font_family = Some(WeightedFontFamily {
                font_family: family.clone(),
                weight: None,
            });
            fields.push("weightedFontFamily");
        }
        if let Some(color) = &self.color {
            style.foreground_color = Some(parse_hex_color(color)?.into());
            fields.push("foregroundColor");
        }
        if let Some(color) = &self.background {
            style.background_color = Some(parse_hex_color(color)?.into());
            fields.push("backgroundColor");
        }
        if let Some(url) = &self.link {
            require_text("link", url)?;
            style.link = Some(Link { url: url.clone() });
            fields.push("link");
        }

        if fields.is_empty() {
            return Err(DocsError::Validation(
                "no style attributes given".into(),
            ));
        }
        Ok((style, fields.join(",")))
    }
}

impl Composer for StyleText {
    fn intent(&self) -> &'static str {
        "update text style"
    }

    fn validate(&self) -> Result<()> {
        validate_range(self.from, self.to)?;
        self.style().map(|_| ())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let (text_style, fields) = self.style()?;
        Ok(vec![Request::UpdateTextStyle {
            range: Range::new(self.from, self.to, ctx.tab_id),
            text_style,
            fields,
        }])
    }
}

const NAMED_STYLES: &[&str] = &[
    "NORMAL_TEXT",
    "TITLE",
    "SUBTITLE",
    "HEADING_1",
    "HEADING_2",
    "HEADING_3",
    "HEADING_4",
    "HEADING_5",
    "HEADING_6",
];

const ALIGNMENTS: &[&str] = &["START", "CENTER", "END", "JUSTIFIED"];

/// Paragraph formatting for every paragraph overlapping `[from, to)`.
#[derive(Debug, Clone, Default)]
pub struct StyleParagraph {
    pub from: i64,
    pub to: i64,
    pub named_style: Option<String>,
    pub alignment: Option<String>,
    /// Percent of single spacing.
    pub line_spacing: Option<f64>,
}

impl StyleParagraph {
    fn style(&self) -> Result<(ParagraphStyle, String)> {
        let mut style = ParagraphStyle::default();
        let mut fields = Vec::new();

        if let Some(named) = &self.named_style {
            let named = named.to_uppercase();
            if !NAMED_STYLES.contains(&named.as_str()) {
                return Err(DocsError::Validation(format!(
                    "unknown named style {:?} (expected one of {})",
                    named,
                    NAMED_STYLES.join(", ")
                )));
            }
            style.named_style_type = Some(named);
            fields.push("namedStyleType");
        }
        if let Some(alignment) = &self.alignment {
            let alignment = alignment.to_uppercase();
            if !ALIGNMENTS.contains(&alignment.as_str()) {
                return Err(DocsError::Validation(format!(
                    "unknown alignment {:?} (expected one of {})",
                    alignment,
                    ALIGNMENTS.join(", ")
                )));
            }
            style.alignment = Some(alignment);
            fields.push("alignment");
        }
        if let Some(spacing) = self.line_spacing {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(DocsError::Validation(format!(
                    "--line-spacing must be positive, got {}",
                    spacing
                )));
            }
            style.line_spacing = Some(spacing);
            fields.push("lineSpacing");
        }

        if fields.is_empty() {
            return Err(DocsError::Validation(
                "no paragraph style attributes given".into(),
            ));
        }
        Ok((style, fields.join(",")))
    }
}

impl Composer for StyleParagraph {
    fn intent(&self) -> &'static str {
        "update paragraph style"
    }

    fn validate(&self) -> Result<()> {
        validate_range(self.from, self.to)?;
        self.style().map(|_| ())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let (paragraph_style, fields) = self.style()?;
        Ok(vec![Request::UpdateParagraphStyle {
            range: Range::new(self.from, self.to, ctx.tab_id),
            paragraph_style,
            fields,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Body, Document, Tab};
    use crate::operation::{Location, OptionalColor, RgbColor};

    fn legacy(offsets: &[(i64, i64)]) -> Document {
        Document {
            document_id: "doc".into(),
            body: Some(Body::from_offsets(offsets)),
            ..Default::default()
        }
    }

    #[test]
    fn test_append_anchors_before_trailing_newline() {
        let doc = legacy(&[(0, 1), (1, 50)]);
        let append = Append {
            text: "more".into(),
            format: ContentFormat::Plaintext,
            newline: true,
        };
        let reqs = append.compose(&EditContext::new(Some(&doc), "")).unwrap();
        assert_eq!(reqs, vec![Request::insert_text("\nmore", Location::new(49, ""))]);
    }

    #[test]
    fn test_append_without_newline_into_tab() {
        let doc = Document {
            tabs: vec![
                Tab::new("t.0", "One").with_body(Body::from_offsets(&[(0, 1), (1, 8)])),
                Tab::new("t.1", "Two").with_body(Body::from_offsets(&[(0, 1), (1, 30)])),
            ],
            ..Default::default()
        };
        let append = Append {
            text: "tail".into(),
            format: ContentFormat::Markdown,
            newline: false,
        };
        let reqs = append.compose(&EditContext::new(Some(&doc), "t.1")).unwrap();
        assert_eq!(reqs, vec![Request::insert_text("tail", Location::new(29, "t.1"))]);
    }

    #[test]
    fn test_append_to_empty_body() {
        let doc = legacy(&[]);
        let append = Append {
            text: "x".into(),
            format: ContentFormat::Plaintext,
            newline: true,
        };
        assert_eq!(
            append.compose(&EditContext::new(Some(&doc), "")).unwrap_err(),
            DocsError::EmptyDocument
        );
    }

    #[test]
    fn test_append_richformat_skips_snapshot() {
        let append = Append {
            text: r#"[{"insertText": {"text": "x", "location": {"index": 1}}}]"#.into(),
            format: ContentFormat::Richformat,
            newline: true,
        };
        assert!(!append.needs_snapshot());
        assert!(!append.uses_tab());
        let reqs = append.compose(&EditContext::new(None, "")).unwrap();
        assert_eq!(reqs, vec![Request::insert_text("x", Location::new(1, ""))]);
    }

    #[test]
    fn test_insert_validation() {
        let insert = |at, format| Insert {
            text: "x".into(),
            format,
            at,
        };
        assert!(insert(Some(1), ContentFormat::Plaintext).validate().is_ok());
        assert!(insert(Some(0), ContentFormat::Plaintext).validate().is_err());
        assert!(insert(None, ContentFormat::Markdown).validate().is_err());

        let rich = Insert {
            text: r#"[{"deleteTab": {"tabId": "t.1"}}]"#.into(),
            format: ContentFormat::Richformat,
            at: Some(0),
        };
        assert!(rich.validate().is_ok());
        assert_eq!(rich.warnings().len(), 1);

        let broken = Insert {
            text: "{".into(),
            format: ContentFormat::Richformat,
            at: None,
        };
        assert!(matches!(broken.validate(), Err(DocsError::Parse(_))));
    }

    #[test]
    fn test_delete_range() {
        let delete = DeleteRange { from: 3, to: 9 };
        assert!(delete.validate().is_ok());
        assert_eq!(
            delete.compose(&EditContext::new(None, "t.2")).unwrap(),
            vec![Request::DeleteContentRange {
                range: Range::new(3, 9, "t.2")
            }]
        );
        assert!(DeleteRange { from: 0, to: 9 }.validate().is_err());
        assert!(DeleteRange { from: 9, to: 9 }.validate().is_err());
    }

    #[test]
    fn test_replace_all_scopes_tab_and_reports_count() {
        let replace = ReplaceAll {
            find: "foo".into(),
            replace: "bar".into(),
            match_case: true,
        };
        let reqs = replace.compose(&EditContext::new(None, "t.1")).unwrap();
        match &reqs[0] {
            Request::ReplaceAllText { tabs_criteria, .. } => {
                assert_eq!(tabs_criteria.as_ref().unwrap().tab_ids, vec!["t.1"]);
            }
            other => panic!("unexpected request: {:?}", other),
        }

        let replies: Vec<Reply> =
            serde_json::from_str(r#"[{"replaceAllText": {"occurrencesChanged": 4}}]"#).unwrap();
        let mut out = ResultMap::new();
        replace.report(&replies, &mut out);
        assert_eq!(out["replacements"], json!(4));
    }

    #[test]
    fn test_style_text_field_mask() {
        let style = StyleText {
            from: 1,
            to: 5,
            bold: Some(true),
            underline: Some(false),
            font_size: Some(14.0),
            color: Some("#00FF00".into()),
            ..Default::default()
        };
        let reqs = style.compose(&EditContext::new(None, "")).unwrap();
        match &reqs[0] {
            Request::UpdateTextStyle {
                text_style, fields, ..
            } => {
                assert_eq!(fields, "bold,underline,fontSize,foregroundColor");
                assert_eq!(text_style.underline, Some(false));
                assert_eq!(text_style.italic, None);
                assert_eq!(
                    text_style.foreground_color,
                    Some(OptionalColor::from(RgbColor {
                        red: 0.0,
                        green: 1.0,
                        blue: 0.0
                    }))
                );
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_style_text_requires_attributes() {
        let style = StyleText {
            from: 1,
            to: 5,
            ..Default::default()
        };
        assert!(style.validate().is_err());

        let bad_color = StyleText {
            from: 1,
            to: 5,
            background: Some("blue".into()),
            ..Default::default()
        };
        assert!(bad_color.validate().is_err());
    }

    #[test]
    fn test_style_paragraph() {
        let style = StyleParagraph {
            from: 1,
            to: 20,
            named_style: Some("heading_2".into()),
            alignment: Some("center".into()),
            line_spacing: None,
        };
        let reqs = style.compose(&EditContext::new(None, "")).unwrap();
        match &reqs[0] {
            Request::UpdateParagraphStyle {
                paragraph_style,
                fields,
                ..
            } => {
                assert_eq!(fields, "namedStyleType,alignment");
                assert_eq!(paragraph_style.named_style_type.as_deref(), Some("HEADING_2"));
                assert_eq!(paragraph_style.alignment.as_deref(), Some("CENTER"));
            }
            other => panic!("unexpected request: {:?}", other),
        }

        let bad = StyleParagraph {
            from: 1,
            to: 2,
            alignment: Some("diagonal".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
