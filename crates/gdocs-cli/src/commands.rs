//! Subcommands and their translation into composers.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use gdocs_core::compose::{
    AddFootnote, AddList, AddTab, AddTable, Append, BorderEdge, CellStyle, CellTarget,
    ColumnWidth, Composer, CreateNamedRange, CreateSegment, DeleteNamedRange, DeleteRange,
    DeleteSegment, DeleteTab, Insert, InsertImage, InsertPageBreak, MergeCells, PinHeaderRows,
    RemoveList, RenameTab, ReplaceAll, ReplaceNamedRange, ResultMap, RowHeight, SegmentKind,
    StyleParagraph, StyleText, TableEdit, TableEditKind,
};
use gdocs_core::{ContentFormat, DocsEditor, DocsError, DocumentService, TabTarget};

/// `--tab` / `--tab-index`. Conflicts are reported by the editor.
#[derive(Args, Debug, Clone, Default)]
pub struct TabArgs {
    /// Tab ID, or tab title (case-insensitive)
    #[arg(long)]
    pub tab: Option<String>,

    /// Zero-based position in the flattened tab list
    #[arg(long = "tab-index")]
    pub tab_index: Option<usize>,
}

impl TabArgs {
    pub fn target(&self) -> TabTarget {
        TabTarget::new(self.tab.clone(), self.tab_index)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct TextArgs {
    /// Text to write
    #[arg(long)]
    pub text: Option<String>,

    /// Read the text from a file, or from stdin with `-`
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl TextArgs {
    pub fn read(&self) -> anyhow::Result<String> {
        match (&self.text, &self.file) {
            (Some(text), None) => Ok(text.clone()),
            (None, Some(path)) if path.as_os_str() == "-" => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read text from stdin")?;
                Ok(text)
            }
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            (Some(_), Some(_)) => {
                Err(DocsError::Validation("give either --text or --file, not both".into()).into())
            }
            (None, None) => {
                Err(DocsError::Validation("one of --text or --file is required".into()).into())
            }
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CellArgs {
    /// Start index of the table
    #[arg(long = "table-start")]
    pub table_start: i64,

    /// Zero-based row
    #[arg(long)]
    pub row: i64,

    /// Zero-based column
    #[arg(long = "col")]
    pub column: i64,
}

impl From<CellArgs> for CellTarget {
    fn from(args: CellArgs) -> Self {
        CellTarget {
            table_start: args.table_start,
            row: args.row,
            column: args.column,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the document's tabs in pre-order
    Tabs { document: String },

    /// Append text to the end of a tab
    Append {
        document: String,
        #[command(flatten)]
        text: TextArgs,
        /// plaintext, markdown or richformat
        #[arg(long = "content-format", alias = "format", default_value = "plaintext")]
        format: String,
        /// Continue the last paragraph instead of starting a new line
        #[arg(long = "no-newline")]
        no_newline: bool,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Insert text at a position
    Insert {
        document: String,
        #[command(flatten)]
        text: TextArgs,
        /// plaintext, markdown or richformat
        #[arg(long = "content-format", alias = "format", default_value = "plaintext")]
        format: String,
        #[arg(long)]
        at: Option<i64>,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Delete the content in [from, to)
    Delete {
        document: String,
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Replace every occurrence of a string
    Replace {
        document: String,
        #[arg(long)]
        find: String,
        #[arg(long, default_value = "")]
        replace: String,
        #[arg(long)]
        match_case: bool,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Set character formatting over [from, to)
    StyleText {
        document: String,
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        bold: Option<bool>,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        italic: Option<bool>,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        underline: Option<bool>,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        strikethrough: Option<bool>,
        /// Points
        #[arg(long)]
        font_size: Option<f64>,
        #[arg(long)]
        font_family: Option<String>,
        /// #RRGGBB
        #[arg(long)]
        color: Option<String>,
        /// #RRGGBB
        #[arg(long)]
        background: Option<String>,
        #[arg(long)]
        link: Option<String>,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Set paragraph formatting over [from, to)
    StyleParagraph {
        document: String,
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        /// NORMAL_TEXT, TITLE, SUBTITLE, HEADING_1 .. HEADING_6
        #[arg(long)]
        named_style: Option<String>,
        /// START, CENTER, END or JUSTIFIED
        #[arg(long)]
        alignment: Option<String>,
        /// Percent of single spacing
        #[arg(long)]
        line_spacing: Option<f64>,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Insert items and turn them into a list
    AddList {
        document: String,
        /// Semicolon-separated items
        #[arg(long)]
        items: String,
        #[arg(long)]
        at: i64,
        #[arg(long)]
        numbered: bool,
        /// Bullet preset, e.g. BULLET_CHECKBOX
        #[arg(long)]
        preset: Option<String>,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Remove list bullets from paragraphs in [from, to)
    RemoveList {
        document: String,
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Insert an empty table
    AddTable {
        document: String,
        #[arg(long)]
        rows: i64,
        #[arg(long = "cols")]
        columns: i64,
        /// End of the tab when absent
        #[arg(long)]
        at: Option<i64>,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Edit an existing table
    Table {
        #[command(subcommand)]
        action: TableCommand,
    },

    /// Create, delete or fill named ranges
    NamedRange {
        #[command(subcommand)]
        action: NamedRangeCommand,
    },

    /// Create or delete the default header
    Header {
        #[command(subcommand)]
        action: SegmentCommand,
    },

    /// Create or delete the default footer
    Footer {
        #[command(subcommand)]
        action: SegmentCommand,
    },

    /// Add, rename or delete tabs
    Tab {
        #[command(subcommand)]
        action: TabCommand,
    },

    /// Insert an inline image from a URL
    Image {
        document: String,
        #[arg(long)]
        uri: String,
        #[arg(long)]
        at: Option<i64>,
        /// Points
        #[arg(long)]
        width: Option<f64>,
        /// Points
        #[arg(long)]
        height: Option<f64>,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Insert a page break
    PageBreak {
        document: String,
        #[arg(long)]
        at: Option<i64>,
        #[command(flatten)]
        tab: TabArgs,
    },

    /// Insert a footnote reference
    Footnote {
        document: String,
        #[arg(long)]
        at: Option<i64>,
        #[command(flatten)]
        tab: TabArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TableCommand {
    InsertRow {
        document: String,
        #[command(flatten)]
        cell: CellArgs,
        /// Insert above the cell instead of below
        #[arg(long)]
        above: bool,
        #[command(flatten)]
        tab: TabArgs,
    },
    InsertColumn {
        document: String,
        #[command(flatten)]
        cell: CellArgs,
        /// Insert left of the cell instead of right
        #[arg(long)]
        left: bool,
        #[command(flatten)]
        tab: TabArgs,
    },
    DeleteRow {
        document: String,
        #[command(flatten)]
        cell: CellArgs,
        #[command(flatten)]
        tab: TabArgs,
    },
    DeleteColumn {
        document: String,
        #[command(flatten)]
        cell: CellArgs,
        #[command(flatten)]
        tab: TabArgs,
    },
    Merge {
        document: String,
        #[command(flatten)]
        cell: CellArgs,
        #[arg(long, default_value_t = 1)]
        row_span: i64,
        #[arg(long = "col-span", default_value_t = 1)]
        column_span: i64,
        #[command(flatten)]
        tab: TabArgs,
    },
    Unmerge {
        document: String,
        #[command(flatten)]
        cell: CellArgs,
        #[arg(long, default_value_t = 1)]
        row_span: i64,
        #[arg(long = "col-span", default_value_t = 1)]
        column_span: i64,
        #[command(flatten)]
        tab: TabArgs,
    },
    /// Repeat the first rows on every page (0 unpins)
    PinHeaderRows {
        document: String,
        #[arg(long = "table-start")]
        table_start: i64,
        #[arg(long)]
        rows: i64,
        #[command(flatten)]
        tab: TabArgs,
    },
    /// Background and borders for a block of cells
    StyleCells {
        document: String,
        #[command(flatten)]
        cell: CellArgs,
        #[arg(long, default_value_t = 1)]
        row_span: i64,
        #[arg(long = "col-span", default_value_t = 1)]
        column_span: i64,
        /// #RRGGBB
        #[arg(long)]
        background: Option<String>,
        /// Comma-separated edges: top, bottom, left, right, inner-horizontal, inner-vertical or all
        #[arg(long)]
        border: Option<String>,
        #[arg(long, default_value = "#000000")]
        border_color: String,
        /// Points
        #[arg(long, default_value_t = 1.0)]
        border_width: f64,
        /// SOLID, DOT or DASH
        #[arg(long, default_value = "SOLID")]
        dash: String,
        #[command(flatten)]
        tab: TabArgs,
    },
    ColumnWidth {
        document: String,
        #[arg(long = "table-start")]
        table_start: i64,
        /// Zero-based column indices
        #[arg(long = "col", value_delimiter = ',', required = true)]
        columns: Vec<i64>,
        /// Points
        #[arg(long)]
        width: f64,
        #[command(flatten)]
        tab: TabArgs,
    },
    RowHeight {
        document: String,
        #[arg(long = "table-start")]
        table_start: i64,
        /// Zero-based row indices
        #[arg(long = "row", value_delimiter = ',', required = true)]
        rows: Vec<i64>,
        /// Minimum height in points
        #[arg(long)]
        height: f64,
        #[command(flatten)]
        tab: TabArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum NamedRangeCommand {
    Create {
        document: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        from: i64,
        #[arg(long)]
        to: i64,
        #[command(flatten)]
        tab: TabArgs,
    },
    Delete {
        document: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        tab: TabArgs,
    },
    /// Replace the content of named ranges
    Replace {
        document: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        text: TextArgs,
        #[command(flatten)]
        tab: TabArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SegmentCommand {
    Create {
        document: String,
        #[command(flatten)]
        tab: TabArgs,
    },
    Delete {
        document: String,
        #[arg(long)]
        id: String,
        #[command(flatten)]
        tab: TabArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TabCommand {
    Add {
        document: String,
        #[arg(long)]
        title: String,
        /// Zero-based position among siblings
        #[arg(long)]
        index: Option<i64>,
        /// Parent tab ID or title
        #[arg(long)]
        parent: Option<String>,
        /// Parent tab by position in the flattened tab list
        #[arg(long = "parent-index")]
        parent_index: Option<usize>,
    },
    Rename {
        document: String,
        #[arg(long)]
        title: String,
        #[command(flatten)]
        tab: TabArgs,
    },
    /// Delete a tab and its child tabs
    Delete {
        document: String,
        #[command(flatten)]
        tab: TabArgs,
    },
}

/// One editing command ready for the editor.
pub struct Edit {
    pub document: String,
    pub target: TabTarget,
    pub composer: Box<dyn Composer>,
}

impl Edit {
    fn new(document: String, tab: TabArgs, composer: impl Composer + 'static) -> Self {
        Self {
            document,
            target: tab.target(),
            composer: Box::new(composer),
        }
    }
}

fn content_format(value: &str) -> anyhow::Result<ContentFormat> {
    Ok(value.parse::<ContentFormat>()?)
}

impl TableCommand {
    fn into_edit(self) -> anyhow::Result<Edit> {
        let edit = |document, cell: CellArgs, kind, tab| {
            Edit::new(
                document,
                tab,
                TableEdit {
                    cell: cell.into(),
                    kind,
                },
            )
        };
        Ok(match self {
            TableCommand::InsertRow {
                document,
                cell,
                above,
                tab,
            } => edit(document, cell, TableEditKind::InsertRow { below: !above }, tab),
            TableCommand::InsertColumn {
                document,
                cell,
                left,
                tab,
            } => edit(document, cell, TableEditKind::InsertColumn { right: !left }, tab),
            TableCommand::DeleteRow { document, cell, tab } => {
                edit(document, cell, TableEditKind::DeleteRow, tab)
            }
            TableCommand::DeleteColumn { document, cell, tab } => {
                edit(document, cell, TableEditKind::DeleteColumn, tab)
            }
            TableCommand::Merge {
                document,
                cell,
                row_span,
                column_span,
                tab,
            } => Edit::new(
                document,
                tab,
                MergeCells {
                    cell: cell.into(),
                    row_span,
                    column_span,
                    unmerge: false,
                },
            ),
            TableCommand::Unmerge {
                document,
                cell,
                row_span,
                column_span,
                tab,
            } => Edit::new(
                document,
                tab,
                MergeCells {
                    cell: cell.into(),
                    row_span,
                    column_span,
                    unmerge: true,
                },
            ),
            TableCommand::PinHeaderRows {
                document,
                table_start,
                rows,
                tab,
            } => Edit::new(
                document,
                tab,
                PinHeaderRows {
                    table_start,
                    count: rows,
                },
            ),
            TableCommand::StyleCells {
                document,
                cell,
                row_span,
                column_span,
                background,
                border,
                border_color,
                border_width,
                dash,
                tab,
            } => {
                let borders = match border {
                    Some(edges) => BorderEdge::parse_list(&edges)?,
                    None => Vec::new(),
                };
                Edit::new(
                    document,
                    tab,
                    CellStyle {
                        cell: cell.into(),
                        row_span,
                        column_span,
                        background,
                        borders,
                        border_color,
                        border_width,
                        dash_style: dash,
                    },
                )
            }
            TableCommand::ColumnWidth {
                document,
                table_start,
                columns,
                width,
                tab,
            } => Edit::new(
                document,
                tab,
                ColumnWidth {
                    table_start,
                    columns,
                    width,
                },
            ),
            TableCommand::RowHeight {
                document,
                table_start,
                rows,
                height,
                tab,
            } => Edit::new(
                document,
                tab,
                RowHeight {
                    table_start,
                    rows,
                    height,
                },
            ),
        })
    }
}

impl NamedRangeCommand {
    fn into_edit(self) -> anyhow::Result<Edit> {
        Ok(match self {
            NamedRangeCommand::Create {
                document,
                name,
                from,
                to,
                tab,
            } => Edit::new(document, tab, CreateNamedRange { name, from, to }),
            NamedRangeCommand::Delete {
                document,
                name,
                id,
                tab,
            } => Edit::new(document, tab, DeleteNamedRange { name, id }),
            NamedRangeCommand::Replace {
                document,
                name,
                id,
                text,
                tab,
            } => {
                let text = text.read()?;
                Edit::new(document, tab, ReplaceNamedRange { name, id, text })
            }
        })
    }
}

impl SegmentCommand {
    fn into_edit(self, kind: SegmentKind) -> Edit {
        match self {
            SegmentCommand::Create { document, tab } => {
                Edit::new(document, tab, CreateSegment { kind })
            }
            SegmentCommand::Delete { document, id, tab } => {
                Edit::new(document, tab, DeleteSegment { kind, id })
            }
        }
    }
}

impl TabCommand {
    fn into_edit(self) -> Edit {
        match self {
            TabCommand::Add {
                document,
                title,
                index,
                parent,
                parent_index,
            } => {
                let parent = TabArgs {
                    tab: parent,
                    tab_index: parent_index,
                };
                Edit::new(document, parent, AddTab { title, index })
            }
            TabCommand::Rename {
                document,
                title,
                tab,
            } => Edit::new(document, tab, RenameTab { title }),
            TabCommand::Delete { document, tab } => Edit::new(document, tab, DeleteTab),
        }
    }
}

impl Command {
    /// Build the edit for every command except `tabs`, which returns `None`.
    ///
    /// Only local work happens here: flag parsing and reading `--file`.
    pub fn into_edit(self) -> anyhow::Result<Option<Edit>> {
        let edit = match self {
            Command::Tabs { .. } => return Ok(None),
            Command::Append {
                document,
                text,
                format,
                no_newline,
                tab,
            } => {
                let format = content_format(&format)?;
                let text = text.read()?;
                Edit::new(
                    document,
                    tab,
                    Append {
                        text,
                        format,
                        newline: !no_newline,
                    },
                )
            }
            Command::Insert {
                document,
                text,
                format,
                at,
                tab,
            } => {
                let format = content_format(&format)?;
                let text = text.read()?;
                Edit::new(document, tab, Insert { text, format, at })
            }
            Command::Delete {
                document,
                from,
                to,
                tab,
            } => Edit::new(document, tab, DeleteRange { from, to }),
            Command::Replace {
                document,
                find,
                replace,
                match_case,
                tab,
            } => Edit::new(
                document,
                tab,
                ReplaceAll {
                    find,
                    replace,
                    match_case,
                },
            ),
            Command::StyleText {
                document,
                from,
                to,
                bold,
                italic,
                underline,
                strikethrough,
                font_size,
                font_family,
                color,
                background,
                link,
                tab,
            } => Edit::new(
                document,
                tab,
                StyleText {
                    from,
                    to,
                    bold,
                    italic,
                    underline,
                    strikethrough,
                    font_size,
                    font_family,
                    color,
                    background,
                    link,
                },
            ),
            Command::StyleParagraph {
                document,
                from,
                to,
                named_style,
                alignment,
                line_spacing,
                tab,
            } => Edit::new(
                document,
                tab,
                StyleParagraph {
                    from,
                    to,
                    named_style,
                    alignment,
                    line_spacing,
                },
            ),
            Command::AddList {
                document,
                items,
                at,
                numbered,
                preset,
                tab,
            } => Edit::new(
                document,
                tab,
                AddList {
                    items,
                    at,
                    numbered,
                    preset,
                },
            ),
            Command::RemoveList {
                document,
                from,
                to,
                tab,
            } => Edit::new(document, tab, RemoveList { from, to }),
            Command::AddTable {
                document,
                rows,
                columns,
                at,
                tab,
            } => Edit::new(document, tab, AddTable { rows, columns, at }),
            Command::Table { action } => action.into_edit()?,
            Command::NamedRange { action } => action.into_edit()?,
            Command::Header { action } => action.into_edit(SegmentKind::Header),
            Command::Footer { action } => action.into_edit(SegmentKind::Footer),
            Command::Tab { action } => action.into_edit(),
            Command::Image {
                document,
                uri,
                at,
                width,
                height,
                tab,
            } => Edit::new(
                document,
                tab,
                InsertImage {
                    uri,
                    at,
                    width,
                    height,
                },
            ),
            Command::PageBreak { document, at, tab } => {
                Edit::new(document, tab, InsertPageBreak { at })
            }
            Command::Footnote { document, at, tab } => {
                Edit::new(document, tab, AddFootnote { at })
            }
        };
        Ok(Some(edit))
    }
}

/// Run one command end to end.
pub async fn run<S: DocumentService>(
    command: Command,
    editor: &DocsEditor<S>,
) -> anyhow::Result<ResultMap> {
    if let Command::Tabs { document } = &command {
        return Ok(editor.list_tabs(document).await?);
    }
    let Some(edit) = command.into_edit()? else {
        anyhow::bail!("command does not edit the document");
    };
    let out = editor
        .apply(&edit.document, &edit.target, edit.composer.as_ref())
        .await?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Cli;
    use clap::{CommandFactory, Parser};
    use gdocs_core::compose::EditContext;
    use gdocs_core::{Body, Document, Location, Request};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn parse_edit(args: &[&str]) -> anyhow::Result<Edit> {
        let cli = Cli::try_parse_from(std::iter::once("gdocs").chain(args.iter().copied()))?;
        Ok(cli.command.into_edit()?.expect("edit command"))
    }

    fn compose(edit: &Edit) -> Vec<Request> {
        edit.composer
            .compose(&EditContext::new(None, "t.1"))
            .unwrap()
    }

    fn legacy_doc() -> Document {
        Document {
            document_id: "doc-1".into(),
            body: Some(Body::from_offsets(&[(0, 1), (1, 50)])),
            ..Default::default()
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_insert_with_text() {
        let edit = parse_edit(&[
            "insert", "doc-1", "--text", "Hi", "--at", "4", "--tab", "Notes",
        ])
        .unwrap();
        assert_eq!(edit.document, "doc-1");
        assert_eq!(edit.target, TabTarget::by_query("Notes"));
        assert_eq!(
            compose(&edit),
            vec![Request::insert_text("Hi", Location::new(4, "t.1"))]
        );
    }

    #[test]
    fn test_text_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "from disk").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let edit = parse_edit(&["append", "doc-1", "--file", &path]).unwrap();
        assert_eq!(edit.composer.intent(), "append text");
        let args = TextArgs {
            text: None,
            file: Some(file.path().to_path_buf()),
        };
        assert_eq!(args.read().unwrap(), "from disk");
    }

    #[test]
    fn test_text_and_file_are_exclusive() {
        for args in [
            vec!["append", "doc-1"],
            vec!["append", "doc-1", "--text", "a", "--file", "b.txt"],
        ] {
            let err = parse_edit(&args).err().unwrap();
            assert_eq!(crate::output::error_code(&err), "VALIDATION_ERROR");
        }
    }

    #[test]
    fn test_append_starts_a_new_line_by_default() {
        let doc = legacy_doc();
        let ctx = EditContext::new(Some(&doc), "");

        let edit = parse_edit(&["append", "doc-1", "--text", "x"]).unwrap();
        assert_eq!(
            edit.composer.compose(&ctx).unwrap(),
            vec![Request::insert_text("\nx", Location::new(49, ""))]
        );

        let edit = parse_edit(&["append", "doc-1", "--text", "x", "--no-newline"]).unwrap();
        assert_eq!(
            edit.composer.compose(&ctx).unwrap(),
            vec![Request::insert_text("x", Location::new(49, ""))]
        );
    }

    #[test]
    fn test_content_format_flag() {
        let edit = parse_edit(&[
            "insert",
            "doc-1",
            "--text",
            "x",
            "--at",
            "5",
            "--content-format",
            "markdown",
        ])
        .unwrap();
        assert_eq!(
            compose(&edit),
            vec![Request::insert_text("x", Location::new(5, "t.1"))]
        );

        let rich = parse_edit(&[
            "append",
            "doc-1",
            "--content-format",
            "richformat",
            "--text",
            r#"[{"insertText": {"text": "r", "location": {"index": 2}}}]"#,
        ])
        .unwrap();
        assert!(!rich.composer.needs_snapshot());
        assert!(rich.composer.warnings().is_empty());
    }

    #[test]
    fn test_unknown_format() {
        for flag in ["--content-format", "--format"] {
            let err = parse_edit(&["append", "doc-1", "--text", "x", flag, "html"])
                .err()
                .unwrap();
            assert_eq!(crate::output::error_code(&err), "UNKNOWN_FORMAT");
        }
    }

    #[test]
    fn test_conflicting_tab_flags_reach_the_editor() {
        let edit = parse_edit(&[
            "delete",
            "doc-1",
            "--from",
            "1",
            "--to",
            "3",
            "--tab",
            "A",
            "--tab-index",
            "0",
        ])
        .unwrap();
        assert_eq!(edit.target.validate(), Err(DocsError::ConflictingFlags));
    }

    #[test]
    fn test_style_text_flag_forms() {
        let edit = parse_edit(&[
            "style-text",
            "doc-1",
            "--from",
            "1",
            "--to",
            "5",
            "--bold",
            "--italic",
            "false",
        ])
        .unwrap();
        match &compose(&edit)[0] {
            Request::UpdateTextStyle {
                text_style, fields, ..
            } => {
                assert_eq!(text_style.bold, Some(true));
                assert_eq!(text_style.italic, Some(false));
                assert_eq!(fields, "bold,italic");
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_table_style_cells_borders() {
        let edit = parse_edit(&[
            "table",
            "style-cells",
            "doc-1",
            "--table-start",
            "5",
            "--row",
            "0",
            "--col",
            "0",
            "--row-span",
            "2",
            "--border",
            "top,inner-horizontal",
        ])
        .unwrap();
        assert_eq!(compose(&edit).len(), 2);

        let err = parse_edit(&[
            "table",
            "style-cells",
            "doc-1",
            "--table-start",
            "5",
            "--row",
            "0",
            "--col",
            "0",
            "--border",
            "sideways",
        ])
        .err()
        .unwrap();
        assert_eq!(crate::output::error_code(&err), "VALIDATION_ERROR");
    }

    #[test]
    fn test_column_width_list() {
        let edit = parse_edit(&[
            "table",
            "column-width",
            "doc-1",
            "--table-start",
            "5",
            "--col",
            "0,2",
            "--width",
            "90",
        ])
        .unwrap();
        match &compose(&edit)[0] {
            Request::UpdateTableColumnProperties { column_indices, .. } => {
                assert_eq!(column_indices, &vec![0, 2]);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_tab_add_parent_flags() {
        let edit = parse_edit(&[
            "tab",
            "add",
            "doc-1",
            "--title",
            "New",
            "--parent-index",
            "2",
        ])
        .unwrap();
        assert_eq!(edit.target, TabTarget::by_index(2));
        assert_eq!(edit.composer.intent(), "add tab");
    }

    #[test]
    fn test_header_and_footer_kinds() {
        let header = parse_edit(&["header", "delete", "doc-1", "--id", "kix.h"]).unwrap();
        assert_eq!(header.composer.intent(), "delete header");
        let footer = parse_edit(&["footer", "create", "doc-1"]).unwrap();
        assert_eq!(footer.composer.intent(), "create footer");
    }

    #[test]
    fn test_tabs_is_not_an_edit() {
        let cli = Cli::try_parse_from(["gdocs", "tabs", "doc-1"]).unwrap();
        assert!(cli.command.into_edit().unwrap().is_none());
    }
}
