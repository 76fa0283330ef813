//! Edit requests and per-request replies.
//!
//! `Request` serializes externally tagged in camelCase, which is exactly the
//! shape the batch update endpoint expects (`{"insertText": {...}}`), so the
//! same type parses hand-authored richformat batches.

use serde::{Deserialize, Serialize};

fn tab_option(tab_id: &str) -> Option<String> {
    (!tab_id.is_empty()).then(|| tab_id.to_string())
}

/// An insertion point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<String>,
}

impl Location {
    /// An empty `tab_id` addresses the default tab.
    pub fn new(index: i64, tab_id: &str) -> Self {
        Self {
            index,
            segment_id: None,
            tab_id: tab_option(tab_id),
        }
    }
}

/// The end of a body, header, footer or footnote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndOfSegmentLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<String>,
}

impl EndOfSegmentLocation {
    pub fn new(tab_id: &str) -> Self {
        Self {
            segment_id: None,
            tab_id: tab_option(tab_id),
        }
    }
}

/// A half-open span `[start_index, end_index)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: i64,
    pub end_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<String>,
}

impl Range {
    pub fn new(start_index: i64, end_index: i64, tab_id: &str) -> Self {
        Self {
            start_index,
            end_index,
            segment_id: None,
            tab_id: tab_option(tab_id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsCriteria {
    pub tab_ids: Vec<String>,
}

impl TabsCriteria {
    /// `None` for the empty (default) tab, which means "all tabs".
    pub fn for_tab(tab_id: &str) -> Option<Self> {
        tab_option(tab_id).map(|id| Self { tab_ids: vec![id] })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub table_start_location: Location,
    #[serde(default)]
    pub row_index: i64,
    #[serde(default)]
    pub column_index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRange {
    pub table_cell_location: TableCellLocation,
    pub row_span: i64,
    pub column_span: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Dimension {
    pub fn pt(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Pt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Pt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    #[serde(default)]
    pub red: f32,
    #[serde(default)]
    pub green: f32,
    #[serde(default)]
    pub blue: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub rgb_color: RgbColor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionalColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl From<RgbColor> for OptionalColor {
    fn from(rgb_color: RgbColor) -> Self {
        Self {
            color: Some(Color { rgb_color }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    pub font_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    /// Percentage of normal spacing (100 = single).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellBorder {
    pub color: OptionalColor,
    pub width: Dimension,
    pub dash_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top: Option<TableCellBorder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<TableCellBorder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_left: Option<TableCellBorder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_right: Option<TableCellBorder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnProperties {
    pub width_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_row_height: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: Dimension,
    pub height: Dimension,
}

/// Properties sent when creating or renaming a tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabPropertiesUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_tab_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstringMatchCriteria {
    pub text: String,
    #[serde(default)]
    pub match_case: bool,
}

/// One atomic edit. Variants map one-to-one onto batch update request kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    InsertText {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_of_segment_location: Option<EndOfSegmentLocation>,
    },
    DeleteContentRange {
        range: Range,
    },
    #[serde(rename_all = "camelCase")]
    ReplaceAllText {
        contains_text: SubstringMatchCriteria,
        replace_text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tabs_criteria: Option<TabsCriteria>,
    },
    #[serde(rename_all = "camelCase")]
    InsertTable {
        rows: i64,
        columns: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_of_segment_location: Option<EndOfSegmentLocation>,
    },
    #[serde(rename_all = "camelCase")]
    InsertTableRow {
        table_cell_location: TableCellLocation,
        insert_below: bool,
    },
    #[serde(rename_all = "camelCase")]
    InsertTableColumn {
        table_cell_location: TableCellLocation,
        insert_right: bool,
    },
    #[serde(rename_all = "camelCase")]
    DeleteTableRow {
        table_cell_location: TableCellLocation,
    },
    #[serde(rename_all = "camelCase")]
    DeleteTableColumn {
        table_cell_location: TableCellLocation,
    },
    #[serde(rename_all = "camelCase")]
    MergeTableCells {
        table_range: TableRange,
    },
    #[serde(rename_all = "camelCase")]
    UnmergeTableCells {
        table_range: TableRange,
    },
    #[serde(rename_all = "camelCase")]
    PinTableHeaderRows {
        table_start_location: Location,
        pinned_header_rows_count: i64,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTableCellStyle {
        table_cell_style: TableCellStyle,
        fields: String,
        table_range: TableRange,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTableColumnProperties {
        table_start_location: Location,
        column_indices: Vec<i64>,
        table_column_properties: TableColumnProperties,
        fields: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTableRowStyle {
        table_start_location: Location,
        row_indices: Vec<i64>,
        table_row_style: TableRowStyle,
        fields: String,
    },
    #[serde(rename_all = "camelCase")]
    CreateParagraphBullets {
        range: Range,
        bullet_preset: String,
    },
    DeleteParagraphBullets {
        range: Range,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTextStyle {
        range: Range,
        text_style: TextStyle,
        fields: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateParagraphStyle {
        range: Range,
        paragraph_style: ParagraphStyle,
        fields: String,
    },
    #[serde(rename_all = "camelCase")]
    CreateHeader {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section_break_location: Option<Location>,
    },
    #[serde(rename_all = "camelCase")]
    CreateFooter {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section_break_location: Option<Location>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteHeader {
        header_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tab_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteFooter {
        footer_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tab_id: Option<String>,
    },
    CreateNamedRange {
        name: String,
        range: Range,
    },
    #[serde(rename_all = "camelCase")]
    DeleteNamedRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        named_range_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tabs_criteria: Option<TabsCriteria>,
    },
    #[serde(rename_all = "camelCase")]
    ReplaceNamedRangeContent {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        named_range_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        named_range_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tabs_criteria: Option<TabsCriteria>,
    },
    #[serde(rename_all = "camelCase")]
    CreateFootnote {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_of_segment_location: Option<EndOfSegmentLocation>,
    },
    #[serde(rename_all = "camelCase")]
    InsertInlineImage {
        uri: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        object_size: Option<Size>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_of_segment_location: Option<EndOfSegmentLocation>,
    },
    #[serde(rename_all = "camelCase")]
    InsertPageBreak {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_of_segment_location: Option<EndOfSegmentLocation>,
    },
    #[serde(rename_all = "camelCase")]
    AddDocumentTab {
        tab_properties: TabPropertiesUpdate,
    },
    #[serde(rename_all = "camelCase")]
    DeleteTab {
        tab_id: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateDocumentTabProperties {
        tab_properties: TabPropertiesUpdate,
        fields: String,
    },
}

impl Request {
    /// Insert `text` at a fixed position.
    pub fn insert_text(text: impl Into<String>, location: Location) -> Self {
        Request::InsertText {
            text: text.into(),
            location: Some(location),
            end_of_segment_location: None,
        }
    }

    /// The request kind as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::InsertText { .. } => "insertText",
            Request::DeleteContentRange { .. } => "deleteContentRange",
            Request::ReplaceAllText { .. } => "replaceAllText",
            Request::InsertTable { .. } => "insertTable",
            Request::InsertTableRow { .. } => "insertTableRow",
            Request::InsertTableColumn { .. } => "insertTableColumn",
            Request::DeleteTableRow { .. } => "deleteTableRow",
            Request::DeleteTableColumn { .. } => "deleteTableColumn",
            Request::MergeTableCells { .. } => "mergeTableCells",
            Request::UnmergeTableCells { .. } => "unmergeTableCells",
            Request::PinTableHeaderRows { .. } => "pinTableHeaderRows",
            Request::UpdateTableCellStyle { .. } => "updateTableCellStyle",
            Request::UpdateTableColumnProperties { .. } => "updateTableColumnProperties",
            Request::UpdateTableRowStyle { .. } => "updateTableRowStyle",
            Request::CreateParagraphBullets { .. } => "createParagraphBullets",
            Request::DeleteParagraphBullets { .. } => "deleteParagraphBullets",
            Request::UpdateTextStyle { .. } => "updateTextStyle",
            Request::UpdateParagraphStyle { .. } => "updateParagraphStyle",
            Request::CreateHeader { .. } => "createHeader",
            Request::CreateFooter { .. } => "createFooter",
            Request::DeleteHeader { .. } => "deleteHeader",
            Request::DeleteFooter { .. } => "deleteFooter",
            Request::CreateNamedRange { .. } => "createNamedRange",
            Request::DeleteNamedRange { .. } => "deleteNamedRange",
            Request::ReplaceNamedRangeContent { .. } => "replaceNamedRangeContent",
            Request::CreateFootnote { .. } => "createFootnote",
            Request::InsertInlineImage { .. } => "insertInlineImage",
            Request::InsertPageBreak { .. } => "insertPageBreak",
            Request::AddDocumentTab { .. } => "addDocumentTab",
            Request::DeleteTab { .. } => "deleteTab",
            Request::UpdateDocumentTabProperties { .. } => "updateDocumentTabProperties",
        }
    }
}

/// Reply to a single request. Most requests reply with an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_all_text: Option<ReplaceAllTextReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_named_range: Option<CreateNamedRangeReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_header: Option<CreateHeaderReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_footer: Option<CreateFooterReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_footnote: Option<CreateFootnoteReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_inline_image: Option<InsertInlineImageReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_document_tab: Option<AddDocumentTabReply>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAllTextReply {
    #[serde(default)]
    pub occurrences_changed: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNamedRangeReply {
    pub named_range_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeaderReply {
    pub header_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFooterReply {
    pub footer_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFootnoteReply {
    pub footnote_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertInlineImageReply {
    pub object_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentTabReply {
    #[serde(default)]
    pub tab_properties: crate::document::TabProperties,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_text_wire_shape() {
        let req = Request::insert_text("hi", Location::new(5, "t.1"));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"insertText": {"text": "hi", "location": {"index": 5, "tabId": "t.1"}}})
        );
        assert_eq!(req.kind(), "insertText");
    }

    #[test]
    fn test_default_tab_is_omitted() {
        let req = Request::DeleteContentRange {
            range: Range::new(1, 4, ""),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"deleteContentRange": {"range": {"startIndex": 1, "endIndex": 4}}})
        );
    }

    #[test]
    fn test_header_type_field() {
        let req = Request::CreateHeader {
            kind: "DEFAULT".into(),
            section_break_location: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"createHeader": {"type": "DEFAULT"}})
        );
    }

    #[test]
    fn test_parse_wire_request() {
        let req: Request = serde_json::from_value(json!({
            "updateTextStyle": {
                "range": {"startIndex": 1, "endIndex": 3},
                "textStyle": {"bold": true, "fontSize": {"magnitude": 12, "unit": "PT"}},
                "fields": "bold,fontSize"
            }
        }))
        .unwrap();
        match req {
            Request::UpdateTextStyle { text_style, fields, .. } => {
                assert_eq!(text_style.bold, Some(true));
                assert_eq!(text_style.font_size, Some(Dimension::pt(12.0)));
                assert_eq!(fields, "bold,fontSize");
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_reply_parsing() {
        let replies: Vec<Reply> = serde_json::from_value(json!([
            {},
            {"replaceAllText": {"occurrencesChanged": 3}},
            {"addDocumentTab": {"tabProperties": {"tabId": "t.new", "title": "New"}}},
            {"replaceAllText": {}}
        ]))
        .unwrap();
        assert_eq!(replies[0], Reply::default());
        assert_eq!(replies[1].replace_all_text.as_ref().unwrap().occurrences_changed, 3);
        assert_eq!(
            replies[2].add_document_tab.as_ref().unwrap().tab_properties.tab_id,
            "t.new"
        );
        assert_eq!(replies[3].replace_all_text.as_ref().unwrap().occurrences_changed, 0);
    }
}
