use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::style::ParagraphStyle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellVAlign {
    Top,
    Middle,
    Bottom,
}

/// One unit of flowable content consumed by the layout engine in sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Text with inline markup, laid out with a resolved style.
    Paragraph { text: String, style: ParagraphStyle },
    Spacer { height: f32 },
    PageBreak,
    Table(TableNode),
}

impl Node {
    pub fn paragraph(text: impl Into<String>, style: &ParagraphStyle) -> Self {
        Node::Paragraph {
            text: text.into(),
            style: style.clone(),
        }
    }

    pub fn spacer(height: f32) -> Self {
        Node::Spacer { height }
    }

    /// Style name of a paragraph node.
    pub fn style_name(&self) -> Option<&str> {
        match self {
            Node::Paragraph { style, .. } => Some(style.name.as_str()),
            _ => None,
        }
    }
}

/// Cell coordinates are `(column, row)`; negative values count back from the
/// last column/row, so `(-1, -1)` is the bottom-right cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRange {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl CellRange {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        Self { start, end }
    }

    pub fn all() -> Self {
        Self::new((0, 0), (-1, -1))
    }

    pub fn row(row: i32) -> Self {
        Self::new((0, row), (-1, row))
    }

    pub fn column(col: i32) -> Self {
        Self::new((col, 0), (col, -1))
    }

    /// Inclusive `(col_range, row_range)` for a table of the given size, or `None`
    /// when the range selects nothing.
    pub(crate) fn resolve(
        &self,
        ncols: usize,
        nrows: usize,
    ) -> Option<(std::ops::RangeInclusive<usize>, std::ops::RangeInclusive<usize>)> {
        let fix = |v: i32, n: usize| -> Option<usize> {
            let idx = if v < 0 { n as i64 + v as i64 } else { v as i64 };
            (0..n as i64).contains(&idx).then_some(idx as usize)
        };
        let c0 = fix(self.start.0, ncols)?;
        let r0 = fix(self.start.1, nrows)?;
        let c1 = fix(self.end.0, ncols)?;
        let r1 = fix(self.end.1, nrows)?;
        if c0 > c1 || r0 > r1 {
            return None;
        }
        Some((c0..=c1, r0..=r1))
    }
}

/// A styling instruction applied to a rectangular range of table cells.
/// Later commands override earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub enum TableCommand {
    Background(CellRange, [u8; 3]),
    /// Colours cycled row by row, starting at the first row of the range.
    RowBackgrounds(CellRange, Vec<[u8; 3]>),
    TextColor(CellRange, [u8; 3]),
    Font(CellRange, String, f32),
    Align(CellRange, Alignment),
    VAlign(CellRange, CellVAlign),
    /// Lines around every cell in the range.
    Grid(CellRange, f32, [u8; 3]),
    /// Outline around the range only.
    Box(CellRange, f32, [u8; 3]),
    Padding(CellRange, f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableNode {
    pub rows: Vec<Vec<String>>,
    pub col_widths: Option<Vec<f32>>,
    pub commands: Vec<TableCommand>,
    /// Redraw the first row at the top of every continuation page.
    pub repeat_header: bool,
}

impl TableNode {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            col_widths: None,
            commands: Vec::new(),
            repeat_header: false,
        }
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// One body entry of a section: marked-up text, or a node built by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentItem {
    Text(String),
    Node(Node),
}

impl From<&str> for ContentItem {
    fn from(s: &str) -> Self {
        ContentItem::Text(s.to_string())
    }
}

impl From<String> for ContentItem {
    fn from(s: String) -> Self {
        ContentItem::Text(s)
    }
}

impl From<Node> for ContentItem {
    fn from(node: Node) -> Self {
        ContentItem::Node(node)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableDescriptor {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column widths in points.
    pub col_widths: Option<Vec<f32>>,
}

impl TableDescriptor {
    pub fn new<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
            col_widths: None,
        }
    }

    pub fn with_col_widths(mut self, widths: Vec<f32>) -> Self {
        self.col_widths = Some(widths);
        self
    }

    /// Every row must have as many cells as there are headers, and width hints
    /// (if any) must match the column count and be positive.
    pub fn validate(&self) -> Result<()> {
        let ncols = self.headers.len();
        if ncols == 0 {
            return Err(Error::Validation("table has no header cells".into()));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::Validation(format!(
                    "table row {} has {} cells, expected {}",
                    i + 1,
                    row.len(),
                    ncols
                )));
            }
        }
        if let Some(widths) = &self.col_widths {
            if widths.len() != ncols {
                return Err(Error::Validation(format!(
                    "table has {} column widths for {} columns",
                    widths.len(),
                    ncols
                )));
            }
            if let Some(w) = widths.iter().find(|w| !(**w > 0.0)) {
                return Err(Error::Validation(format!(
                    "table column width must be positive, got {w}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionDescriptor {
    pub title: String,
    pub title_localized: Option<String>,
    pub heading_level: u8,
    pub body: Vec<ContentItem>,
    pub table: Option<TableDescriptor>,
}

impl SectionDescriptor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            title_localized: None,
            heading_level: 1,
            body: Vec::new(),
            table: None,
        }
    }

    pub fn localized(mut self, title: impl Into<String>) -> Self {
        self.title_localized = Some(title.into());
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.heading_level = level;
        self
    }

    pub fn body<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ContentItem>,
    {
        self.body.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn table(mut self, table: TableDescriptor) -> Self {
        self.table = Some(table);
        self
    }
}

/// Identifying metadata of one document: shown on the cover, in the page
/// decorations and in the PDF info dictionary.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub title_localized: Option<String>,
    pub document_type: String,
    pub department: String,
    pub classification: String,
    pub author: String,
    pub version: String,
    pub generated_at: NaiveDateTime,
}

impl DocumentInfo {
    pub fn new(
        title: impl Into<String>,
        document_type: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            title_localized: None,
            document_type: document_type.into(),
            department: department.into(),
            classification: crate::decor::DEFAULT_CLASSIFICATION.to_string(),
            author: "BrainSAIT".to_string(),
            version: "1.0".to_string(),
            generated_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn localized(mut self, title: impl Into<String>) -> Self {
        self.title_localized = Some(title.into());
        self
    }

    pub fn classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = classification.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Fix the timestamp printed on the cover and in every footer.
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = at;
        self
    }

    /// `"{document_type} - {department}"`, the PDF subject.
    pub fn subject(&self) -> String {
        format!("{} - {}", self.document_type, self.department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_resolution() {
        let (cols, rows) = CellRange::all().resolve(3, 4).unwrap();
        assert_eq!((cols, rows), (0..=2, 0..=3));

        let (cols, rows) = CellRange::new((0, 1), (-1, -1)).resolve(2, 5).unwrap();
        assert_eq!((cols, rows), (0..=1, 1..=4));

        // A body-row range on a header-only table selects nothing.
        assert!(CellRange::new((0, 1), (-1, -1)).resolve(2, 1).is_none());
        assert!(CellRange::column(5).resolve(2, 2).is_none());
    }

    #[test]
    fn documents_default_to_the_header_classification() {
        let info = DocumentInfo::new("Plan", "Business Plan", "Finance");
        assert_eq!(info.classification, crate::decor::DEFAULT_CLASSIFICATION);
    }

    #[test]
    fn ragged_table_is_rejected() {
        let table = TableDescriptor::new(["A", "B"], [vec!["1", "2"], vec!["3"]]);
        let err = table.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("row 2")));
    }

    #[test]
    fn width_hints_must_match_columns() {
        let table = TableDescriptor::new(["A", "B"], [["1", "2"]]).with_col_widths(vec![72.0]);
        assert!(matches!(table.validate(), Err(Error::Validation(_))));
        let table = TableDescriptor::new(["A", "B"], [["1", "2"]]).with_col_widths(vec![72.0, 0.0]);
        assert!(matches!(table.validate(), Err(Error::Validation(_))));
    }
}
