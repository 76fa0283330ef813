//! Table creation and cell-level structural edits.
//!
//! Cells are addressed from the table's start index plus zero-based row and
//! column indices, exactly as the service expects.

use std::str::FromStr;

use super::{anchor, parse_hex_color, validate_position, Composer, EditContext};
use crate::error::{DocsError, Result};
use crate::operation::{
    Dimension, Location, Request, TableCellBorder, TableCellLocation, TableCellStyle,
    TableColumnProperties, TableRange, TableRowStyle,
};

/// Insert an empty `rows` x `columns` table.
#[derive(Debug, Clone)]
pub struct AddTable {
    pub rows: i64,
    pub columns: i64,
    /// End of the body when absent.
    pub at: Option<i64>,
}

impl Composer for AddTable {
    fn intent(&self) -> &'static str {
        "insert table"
    }

    fn validate(&self) -> Result<()> {
        if self.rows < 1 || self.columns < 1 {
            return Err(DocsError::Validation(format!(
                "a table needs at least one row and one column, got {}x{}",
                self.rows, self.columns
            )));
        }
        if let Some(at) = self.at {
            validate_position("at", at)?;
        }
        Ok(())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let (location, end_of_segment_location) = anchor(self.at, ctx.tab_id);
        Ok(vec![Request::InsertTable {
            rows: self.rows,
            columns: self.columns,
            location,
            end_of_segment_location,
        }])
    }
}

fn validate_table_start(table_start: i64) -> Result<()> {
    validate_position("table-start", table_start)
}

fn validate_spans(row_span: i64, column_span: i64) -> Result<()> {
    if row_span < 1 || column_span < 1 {
        return Err(DocsError::Validation(format!(
            "--row-span and --col-span must be >= 1, got {} and {}",
            row_span, column_span
        )));
    }
    Ok(())
}

/// One cell of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellTarget {
    pub table_start: i64,
    pub row: i64,
    pub column: i64,
}

impl CellTarget {
    pub fn validate(&self) -> Result<()> {
        validate_table_start(self.table_start)?;
        if self.row < 0 || self.column < 0 {
            return Err(DocsError::Validation(format!(
                "--row and --col must be >= 0, got {} and {}",
                self.row, self.column
            )));
        }
        Ok(())
    }

    pub fn location(&self, tab_id: &str) -> TableCellLocation {
        TableCellLocation {
            table_start_location: Location::new(self.table_start, tab_id),
            row_index: self.row,
            column_index: self.column,
        }
    }

    /// Checks a `row_span` x `column_span` block anchored at this cell.
    pub fn validate_block(&self, row_span: i64, column_span: i64) -> Result<()> {
        self.validate()?;
        validate_spans(row_span, column_span)?;
        if self.row.checked_add(row_span).is_none()
            || self.column.checked_add(column_span).is_none()
        {
            return Err(DocsError::Validation(format!(
                "a {}x{} span from row {}, column {} is out of range",
                row_span, column_span, self.row, self.column
            )));
        }
        Ok(())
    }

    /// The block of `row_span` x `column_span` cells starting at this cell.
    pub fn range(&self, row_span: i64, column_span: i64, tab_id: &str) -> TableRange {
        TableRange {
            table_cell_location: self.location(tab_id),
            row_span,
            column_span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEditKind {
    InsertRow { below: bool },
    InsertColumn { right: bool },
    DeleteRow,
    DeleteColumn,
}

/// Add or remove the row or column through one cell.
#[derive(Debug, Clone)]
pub struct TableEdit {
    pub cell: CellTarget,
    pub kind: TableEditKind,
}

impl Composer for TableEdit {
    fn intent(&self) -> &'static str {
        match self.kind {
            TableEditKind::InsertRow { .. } => "insert table row",
            TableEditKind::InsertColumn { .. } => "insert table column",
            TableEditKind::DeleteRow => "delete table row",
            TableEditKind::DeleteColumn => "delete table column",
        }
    }

    fn validate(&self) -> Result<()> {
        self.cell.validate()
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let table_cell_location = self.cell.location(ctx.tab_id);
        let request = match self.kind {
            TableEditKind::InsertRow { below } => Request::InsertTableRow {
                table_cell_location,
                insert_below: below,
            },
            TableEditKind::InsertColumn { right } => Request::InsertTableColumn {
                table_cell_location,
                insert_right: right,
            },
            TableEditKind::DeleteRow => Request::DeleteTableRow {
                table_cell_location,
            },
            TableEditKind::DeleteColumn => Request::DeleteTableColumn {
                table_cell_location,
            },
        };
        Ok(vec![request])
    }
}

/// Merge (or unmerge) a block of cells.
#[derive(Debug, Clone)]
pub struct MergeCells {
    pub cell: CellTarget,
    pub row_span: i64,
    pub column_span: i64,
    pub unmerge: bool,
}

impl Composer for MergeCells {
    fn intent(&self) -> &'static str {
        if self.unmerge {
            "unmerge table cells"
        } else {
            "merge table cells"
        }
    }

    fn validate(&self) -> Result<()> {
        self.cell.validate_block(self.row_span, self.column_span)?;
        if !self.unmerge && self.row_span < 2 && self.column_span < 2 {
            return Err(DocsError::Validation(
                "merging needs a span covering at least two cells".into(),
            ));
        }
        Ok(())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let table_range = self.cell.range(self.row_span, self.column_span, ctx.tab_id);
        Ok(vec![if self.unmerge {
            Request::UnmergeTableCells { table_range }
        } else {
            Request::MergeTableCells { table_range }
        }])
    }
}

/// Repeat the first `count` rows on every page; zero unpins.
#[derive(Debug, Clone)]
pub struct PinHeaderRows {
    pub table_start: i64,
    pub count: i64,
}

impl Composer for PinHeaderRows {
    fn intent(&self) -> &'static str {
        "pin table header rows"
    }

    fn validate(&self) -> Result<()> {
        validate_table_start(self.table_start)?;
        if self.count < 0 {
            return Err(DocsError::Validation(format!(
                "--rows must be >= 0, got {}",
                self.count
            )));
        }
        Ok(())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::PinTableHeaderRows {
            table_start_location: Location::new(self.table_start, ctx.tab_id),
            pinned_header_rows_count: self.count,
        }])
    }
}

/// One edge of a block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderEdge {
    Top,
    Bottom,
    Left,
    Right,
    /// Lines between rows inside the block.
    InnerHorizontal,
    /// Lines between columns inside the block.
    InnerVertical,
}

impl BorderEdge {
    pub const ALL: [BorderEdge; 6] = [
        BorderEdge::Top,
        BorderEdge::Bottom,
        BorderEdge::Left,
        BorderEdge::Right,
        BorderEdge::InnerHorizontal,
        BorderEdge::InnerVertical,
    ];

    /// Parse a comma-separated edge list; `all` expands to every edge.
    pub fn parse_list(value: &str) -> Result<Vec<BorderEdge>> {
        let mut edges = Vec::new();
        for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let parsed = if part.eq_ignore_ascii_case("all") {
                BorderEdge::ALL.to_vec()
            } else {
                vec![part.parse()?]
            };
            for edge in parsed {
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        Ok(edges)
    }
}

impl FromStr for BorderEdge {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(BorderEdge::Top),
            "bottom" => Ok(BorderEdge::Bottom),
            "left" => Ok(BorderEdge::Left),
            "right" => Ok(BorderEdge::Right),
            "inner-horizontal" => Ok(BorderEdge::InnerHorizontal),
            "inner-vertical" => Ok(BorderEdge::InnerVertical),
            other => Err(DocsError::Validation(format!(
                "unknown border edge {:?} (expected top, bottom, left, right, inner-horizontal, inner-vertical or all)",
                other
            ))),
        }
    }
}

const DASH_STYLES: &[&str] = &["SOLID", "DOT", "DASH"];

/// Background and border styling for a block of cells.
#[derive(Debug, Clone)]
pub struct CellStyle {
    pub cell: CellTarget,
    pub row_span: i64,
    pub column_span: i64,
    pub background: Option<String>,
    pub borders: Vec<BorderEdge>,
    pub border_color: String,
    /// Points.
    pub border_width: f64,
    pub dash_style: String,
}

impl CellStyle {
    fn border(&self) -> Result<TableCellBorder> {
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(DocsError::Validation(format!(
                "--border-width must be >= 0, got {}",
                self.border_width
            )));
        }
        let dash_style = self.dash_style.to_uppercase();
        if !DASH_STYLES.contains(&dash_style.as_str()) {
            return Err(DocsError::Validation(format!(
                "unknown dash style {:?} (expected one of {})",
                self.dash_style,
                DASH_STYLES.join(", ")
            )));
        }
        Ok(TableCellBorder {
            color: parse_hex_color(&self.border_color)?.into(),
            width: Dimension::pt(self.border_width),
            dash_style,
        })
    }

    /// The cells an edge applies to and the border field it sets there.
    /// `None` for inner edges of a block that has no inside.
    fn edge_range(&self, edge: BorderEdge, tab_id: &str) -> Option<(TableRange, &'static str)> {
        let CellTarget { row, column, .. } = self.cell;
        let (rows, cols) = (self.row_span, self.column_span);
        let at = |row: i64, column: i64, row_span: i64, column_span: i64| {
            CellTarget {
                row,
                column,
                ..self.cell
            }
            .range(row_span, column_span, tab_id)
        };

        match edge {
            BorderEdge::Top => Some((at(row, column, 1, cols), "borderTop")),
            BorderEdge::Bottom => Some((at(row + (rows - 1), column, 1, cols), "borderBottom")),
            BorderEdge::Left => Some((at(row, column, rows, 1), "borderLeft")),
            BorderEdge::Right => Some((at(row, column + (cols - 1), rows, 1), "borderRight")),
            BorderEdge::InnerHorizontal => {
                (rows > 1).then(|| (at(row, column, rows - 1, cols), "borderBottom"))
            }
            BorderEdge::InnerVertical => {
                (cols > 1).then(|| (at(row, column, rows, cols - 1), "borderRight"))
            }
        }
    }
}

impl Composer for CellStyle {
    fn intent(&self) -> &'static str {
        "update table cell style"
    }

    fn validate(&self) -> Result<()> {
        self.cell.validate_block(self.row_span, self.column_span)?;
        if self.background.is_none() && self.borders.is_empty() {
            return Err(DocsError::Validation(
                "nothing to style: give --background and/or --border".into(),
            ));
        }
        if let Some(color) = &self.background {
            parse_hex_color(color)?;
        }
        if !self.borders.is_empty() {
            self.border()?;
        }
        Ok(())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        let mut requests = Vec::new();

        if let Some(color) = &self.background {
            requests.push(Request::UpdateTableCellStyle {
                table_cell_style: TableCellStyle {
                    background_color: Some(parse_hex_color(color)?.into()),
                    ..Default::default()
                },
                fields: "backgroundColor".into(),
                table_range: self.cell.range(self.row_span, self.column_span, ctx.tab_id),
            });
        }

        if self.borders.is_empty() {
            return Ok(requests);
        }
        let border = self.border()?;
        for edge in &self.borders {
            let Some((table_range, field)) = self.edge_range(*edge, ctx.tab_id) else {
                continue;
            };
            let mut style = TableCellStyle::default();
            let slot = match field {
                "borderTop" => &mut style.border_top,
                "borderBottom" => &mut style.border_bottom,
                "borderLeft" => &mut style.border_left,
                _ => &mut style.border_right,
            };
            *slot = Some(border.clone());
            requests.push(Request::UpdateTableCellStyle {
                table_cell_style: style,
                fields: field.into(),
                table_range,
            });
        }
        Ok(requests)
    }
}

fn validate_indices(flag: &str, indices: &[i64]) -> Result<()> {
    if indices.is_empty() {
        return Err(DocsError::Validation(format!("--{} needs at least one index", flag)));
    }
    if let Some(bad) = indices.iter().find(|i| **i < 0) {
        return Err(DocsError::Validation(format!(
            "--{} indices must be >= 0, got {}",
            flag, bad
        )));
    }
    Ok(())
}

fn validate_points(flag: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DocsError::Validation(format!(
            "--{} must be positive, got {}",
            flag, value
        )));
    }
    Ok(())
}

/// Fixed width for some columns.
#[derive(Debug, Clone)]
pub struct ColumnWidth {
    pub table_start: i64,
    pub columns: Vec<i64>,
    /// Points.
    pub width: f64,
}

impl Composer for ColumnWidth {
    fn intent(&self) -> &'static str {
        "update table column width"
    }

    fn validate(&self) -> Result<()> {
        validate_table_start(self.table_start)?;
        validate_indices("col", &self.columns)?;
        validate_points("width", self.width)
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::UpdateTableColumnProperties {
            table_start_location: Location::new(self.table_start, ctx.tab_id),
            column_indices: self.columns.clone(),
            table_column_properties: TableColumnProperties {
                width_type: "FIXED_WIDTH".into(),
                width: Some(Dimension::pt(self.width)),
            },
            fields: "width,widthType".into(),
        }])
    }
}

/// Minimum height for some rows.
#[derive(Debug, Clone)]
pub struct RowHeight {
    pub table_start: i64,
    pub rows: Vec<i64>,
    /// Points.
    pub height: f64,
}

impl Composer for RowHeight {
    fn intent(&self) -> &'static str {
        "update table row height"
    }

    fn validate(&self) -> Result<()> {
        validate_table_start(self.table_start)?;
        validate_indices("row", &self.rows)?;
        validate_points("height", self.height)
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::UpdateTableRowStyle {
            table_start_location: Location::new(self.table_start, ctx.tab_id),
            row_indices: self.rows.clone(),
            table_row_style: TableRowStyle {
                min_row_height: Some(Dimension::pt(self.height)),
            },
            fields: "minRowHeight".into(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::EndOfSegmentLocation;

    const CELL: CellTarget = CellTarget {
        table_start: 12,
        row: 1,
        column: 2,
    };

    fn ctx() -> EditContext<'static> {
        EditContext::new(None, "t.1")
    }

    fn cell_style(row_span: i64, column_span: i64, borders: Vec<BorderEdge>) -> CellStyle {
        CellStyle {
            cell: CELL,
            row_span,
            column_span,
            background: None,
            borders,
            border_color: "#000000".into(),
            border_width: 1.0,
            dash_style: "solid".into(),
        }
    }

    fn edge_summary(requests: &[Request]) -> Vec<(String, i64, i64, i64, i64)> {
        requests
            .iter()
            .map(|r| match r {
                Request::UpdateTableCellStyle {
                    fields, table_range, ..
                } => (
                    fields.clone(),
                    table_range.table_cell_location.row_index,
                    table_range.table_cell_location.column_index,
                    table_range.row_span,
                    table_range.column_span,
                ),
                other => panic!("unexpected request: {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_add_table_anchor() {
        let at_end = AddTable {
            rows: 2,
            columns: 3,
            at: None,
        };
        match &at_end.compose(&ctx()).unwrap()[0] {
            Request::InsertTable {
                end_of_segment_location,
                location,
                ..
            } => {
                assert!(location.is_none());
                assert_eq!(
                    end_of_segment_location.as_ref(),
                    Some(&EndOfSegmentLocation::new("t.1"))
                );
            }
            other => panic!("unexpected request: {:?}", other),
        }
        let table = |rows, columns, at| AddTable { rows, columns, at };
        assert!(table(0, 3, None).validate().is_err());
        assert!(table(1, 1, Some(0)).validate().is_err());
    }

    #[test]
    fn test_table_edit_kinds() {
        let edit = TableEdit {
            cell: CELL,
            kind: TableEditKind::DeleteRow,
        };
        assert_eq!(edit.intent(), "delete table row");
        assert_eq!(
            edit.compose(&ctx()).unwrap(),
            vec![Request::DeleteTableRow {
                table_cell_location: TableCellLocation {
                    table_start_location: Location::new(12, "t.1"),
                    row_index: 1,
                    column_index: 2,
                }
            }]
        );

        let bad = TableEdit {
            cell: CellTarget { row: -1, ..CELL },
            kind: TableEditKind::InsertRow { below: true },
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_merge_needs_two_cells() {
        let merge = |row_span, column_span, unmerge| MergeCells {
            cell: CELL,
            row_span,
            column_span,
            unmerge,
        };
        assert!(merge(1, 1, false).validate().is_err());
        assert!(merge(1, 1, true).validate().is_ok());
        assert!(merge(2, 1, false).validate().is_ok());
        assert!(merge(0, 2, false).validate().is_err());
        assert!(merge(i64::MAX - 5, 2, false).validate().is_ok());
        assert!(matches!(
            merge(i64::MAX, 2, false).validate(),
            Err(DocsError::Validation(_))
        ));
        assert!(matches!(
            merge(1, 2, true).compose(&ctx()).unwrap()[0],
            Request::UnmergeTableCells { .. }
        ));
    }

    #[test]
    fn test_border_all_fans_out_to_six_edges() {
        let style = cell_style(3, 2, BorderEdge::parse_list("all").unwrap());
        let reqs = style.compose(&ctx()).unwrap();
        assert_eq!(
            edge_summary(&reqs),
            vec![
                ("borderTop".to_string(), 1, 2, 1, 2),
                ("borderBottom".to_string(), 3, 2, 1, 2),
                ("borderLeft".to_string(), 1, 2, 3, 1),
                ("borderRight".to_string(), 1, 3, 3, 1),
                ("borderBottom".to_string(), 1, 2, 2, 2),
                ("borderRight".to_string(), 1, 2, 3, 1),
            ]
        );
    }

    #[test]
    fn test_border_list_keeps_first_occurrence() {
        assert_eq!(
            BorderEdge::parse_list("all,top").unwrap(),
            BorderEdge::ALL.to_vec()
        );
        assert_eq!(
            BorderEdge::parse_list("left,top,left,all").unwrap(),
            vec![
                BorderEdge::Left,
                BorderEdge::Top,
                BorderEdge::Bottom,
                BorderEdge::Right,
                BorderEdge::InnerHorizontal,
                BorderEdge::InnerVertical,
            ]
        );
        let style = cell_style(2, 2, BorderEdge::parse_list("top,bottom,top").unwrap());
        assert_eq!(style.compose(&ctx()).unwrap().len(), 2);
    }

    #[test]
    fn test_single_cell_has_no_inner_edges() {
        let style = cell_style(1, 1, BorderEdge::parse_list("all").unwrap());
        assert_eq!(style.compose(&ctx()).unwrap().len(), 4);
    }

    #[test]
    fn test_background_and_edges() {
        let mut style = cell_style(1, 1, BorderEdge::parse_list("top, left").unwrap());
        style.background = Some("#EEEEEE".into());
        let reqs = style.compose(&ctx()).unwrap();
        let fields: Vec<String> = edge_summary(&reqs).into_iter().map(|e| e.0).collect();
        assert_eq!(fields, vec!["backgroundColor", "borderTop", "borderLeft"]);

        match &reqs[1] {
            Request::UpdateTableCellStyle {
                table_cell_style, ..
            } => {
                let border = table_cell_style.border_top.as_ref().unwrap();
                assert_eq!(border.dash_style, "SOLID");
                assert_eq!(border.width, Dimension::pt(1.0));
                assert!(table_cell_style.border_left.is_none());
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_cell_style_validation() {
        assert!(cell_style(1, 1, vec![]).validate().is_err());
        assert!(BorderEdge::parse_list("top,diagonal").is_err());

        let overflow = CellStyle {
            cell: CellTarget {
                row: i64::MAX - 1,
                ..CELL
            },
            ..cell_style(2, 1, vec![BorderEdge::Bottom])
        };
        assert!(matches!(overflow.validate(), Err(DocsError::Validation(_))));

        let mut bad_dash = cell_style(1, 1, vec![BorderEdge::Top]);
        bad_dash.dash_style = "wavy".into();
        assert!(bad_dash.validate().is_err());
    }

    #[test]
    fn test_column_width_and_row_height() {
        let width = ColumnWidth {
            table_start: 12,
            columns: vec![0, 2],
            width: 120.0,
        };
        match &width.compose(&ctx()).unwrap()[0] {
            Request::UpdateTableColumnProperties {
                column_indices,
                fields,
                ..
            } => {
                assert_eq!(column_indices, &vec![0, 2]);
                assert_eq!(fields, "width,widthType");
            }
            other => panic!("unexpected request: {:?}", other),
        }
        assert!(ColumnWidth { columns: vec![], ..width.clone() }.validate().is_err());
        assert!(ColumnWidth { width: 0.0, ..width }.validate().is_err());

        let height = RowHeight {
            table_start: 12,
            rows: vec![-1],
            height: 20.0,
        };
        assert!(height.validate().is_err());
    }

    #[test]
    fn test_pin_header_rows() {
        assert!(PinHeaderRows { table_start: 12, count: -1 }.validate().is_err());
        assert_eq!(
            PinHeaderRows { table_start: 12, count: 1 }.compose(&ctx()).unwrap(),
            vec![Request::PinTableHeaderRows {
                table_start_location: Location::new(12, "t.1"),
                pinned_header_rows_count: 1,
            }]
        );
    }
}
