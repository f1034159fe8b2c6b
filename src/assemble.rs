use crate::error::{Error, Result};
use crate::model::{
    Alignment, CellRange, CellVAlign, ContentItem, DocumentInfo, Node, SectionDescriptor,
    TableCommand, TableDescriptor, TableNode,
};
use crate::style::{ARABIC, BODY, BULLET, BrandConfig, INCH, NOTICE, StyleSheet, TITLE};

/// Turns document metadata and section descriptors into a flat node list.
/// Holds no state beyond its inputs.
pub struct ContentAssembler<'a> {
    brand: &'a BrandConfig,
    styles: &'a StyleSheet,
}

impl<'a> ContentAssembler<'a> {
    pub fn new(brand: &'a BrandConfig, styles: &'a StyleSheet) -> Self {
        Self { brand, styles }
    }

    /// Check a section without producing anything.
    pub fn validate(&self, section: &SectionDescriptor) -> Result<()> {
        if section.title.trim().is_empty() {
            return Err(Error::Validation("section title is blank".into()));
        }
        self.styles.heading(section.heading_level)?;
        if let Some(table) = &section.table {
            table
                .validate()
                .map_err(|e| match e {
                    Error::Validation(msg) => {
                        Error::Validation(format!("section '{}': {msg}", section.title))
                    }
                    other => other,
                })?;
        }
        Ok(())
    }

    pub fn cover_page(&self, info: &DocumentInfo) -> Result<Vec<Node>> {
        if info.title.trim().is_empty() {
            return Err(Error::Validation("document title is blank".into()));
        }
        let c = &self.brand.palette;
        let t = &self.brand.typography;
        let spacing = &self.brand.spacing;

        let mut nodes = vec![
            Node::spacer(2.0 * INCH),
            Node::paragraph(info.title.as_str(), self.styles.get(TITLE)?),
        ];
        if let Some(localized) = info.title_localized.as_deref().filter(|s| !s.trim().is_empty()) {
            nodes.push(Node::paragraph(localized, self.styles.get(ARABIC)?));
        }
        nodes.push(Node::spacer(spacing.large));

        let date = info.generated_at.format("%B %d, %Y").to_string();
        let rows: Vec<Vec<String>> = [
            ("Document Type:", info.document_type.as_str()),
            ("Department:", info.department.as_str()),
            ("Version:", info.version.as_str()),
            ("Date:", date.as_str()),
            ("Author:", info.author.as_str()),
            ("Classification:", info.classification.as_str()),
        ]
        .into_iter()
        .map(|(label, value)| vec![label.to_string(), value.to_string()])
        .collect();

        let mut meta = TableNode::new(rows);
        meta.col_widths = Some(vec![2.0 * INCH, 4.0 * INCH]);
        meta.commands = vec![
            TableCommand::Background(CellRange::column(0), c.light_gray),
            TableCommand::TextColor(CellRange::column(0), c.medical_blue),
            TableCommand::Font(CellRange::column(0), t.body_bold_font.clone(), t.size_body),
            TableCommand::Font(CellRange::column(1), t.body_font.clone(), t.size_body),
            TableCommand::Align(CellRange::all(), Alignment::Left),
            TableCommand::VAlign(CellRange::all(), CellVAlign::Middle),
            TableCommand::Grid(CellRange::all(), 1.0, c.border_gray),
            TableCommand::Padding(CellRange::all(), 10.0),
        ];
        nodes.push(Node::Table(meta));

        let identity = &self.brand.identity;
        let notice = format!(
            "<b>{}</b><br/>{}",
            identity.security_classification, identity.security_classification_localized
        );
        nodes.push(Node::paragraph(notice, self.styles.get(NOTICE)?));
        nodes.push(Node::PageBreak);
        Ok(nodes)
    }

    /// Branded data table: header row in medical blue, zebra body rows.
    pub fn table(&self, table: &TableDescriptor) -> Result<Node> {
        table.validate()?;
        let c = &self.brand.palette;
        let t = &self.brand.typography;
        let body = CellRange::new((0, 1), (-1, -1));

        let mut rows = Vec::with_capacity(table.rows.len() + 1);
        rows.push(table.headers.clone());
        rows.extend(table.rows.iter().cloned());

        let mut node = TableNode::new(rows);
        node.col_widths = table.col_widths.clone();
        node.repeat_header = true;
        node.commands = vec![
            TableCommand::Background(CellRange::row(0), c.medical_blue),
            TableCommand::TextColor(CellRange::row(0), c.white),
            TableCommand::Font(CellRange::row(0), t.body_bold_font.clone(), t.size_body),
            TableCommand::Align(CellRange::row(0), Alignment::Center),
            TableCommand::Background(body, c.white),
            TableCommand::TextColor(body, c.black),
            TableCommand::Font(body, t.body_font.clone(), 10.0),
            TableCommand::Align(body, Alignment::Left),
            TableCommand::RowBackgrounds(body, vec![c.white, c.light_gray]),
            TableCommand::Grid(CellRange::all(), 1.0, c.border_gray),
            TableCommand::VAlign(CellRange::all(), CellVAlign::Middle),
            TableCommand::Padding(CellRange::all(), 8.0),
        ];
        Ok(Node::Table(node))
    }

    pub fn bullet_list<I>(&self, items: I) -> Result<Vec<Node>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let style = self.styles.get(BULLET)?;
        Ok(items
            .into_iter()
            .map(|item| Node::paragraph(format!("\u{2022} {}", item.as_ref()), style))
            .collect())
    }

    pub fn section(&self, section: &SectionDescriptor) -> Result<Vec<Node>> {
        self.validate(section)?;
        let spacing = &self.brand.spacing;
        let body_style = self.styles.get(BODY)?;

        let mut nodes = vec![Node::paragraph(
            section.title.as_str(),
            self.styles.heading(section.heading_level)?,
        )];
        if let Some(localized) = section
            .title_localized
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            nodes.push(Node::paragraph(localized, self.styles.get(ARABIC)?));
        }
        nodes.push(Node::spacer(spacing.small));
        for item in &section.body {
            nodes.push(match item {
                ContentItem::Text(text) => Node::paragraph(text.as_str(), body_style),
                ContentItem::Node(node) => node.clone(),
            });
        }
        nodes.push(Node::spacer(spacing.medium));
        if let Some(table) = &section.table {
            nodes.push(self.table(table)?);
            nodes.push(Node::spacer(spacing.medium));
        }
        Ok(nodes)
    }

    /// Cover (optional) followed by every section. All sections are checked
    /// before any node is produced.
    pub fn assemble(
        &self,
        info: &DocumentInfo,
        sections: &[SectionDescriptor],
        include_cover: bool,
    ) -> Result<Vec<Node>> {
        for section in sections {
            self.validate(section)?;
        }
        let mut nodes = Vec::new();
        if include_cover {
            nodes.extend(self.cover_page(info)?);
        }
        for section in sections {
            nodes.extend(self.section(section)?);
        }
        Ok(nodes)
    }
}
