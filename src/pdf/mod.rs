//! The layout engine: flows [`Node`]s through a single frame per page, calls a
//! decoration callback at the start of every page and serialises the result with
//! `pdf-writer`.

mod bidi;
mod canvas;
mod layout;
mod table;

use chrono::{Datelike, NaiveDateTime, Timelike};
use pdf_writer::{Date, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::error::Result;
use crate::fonts::FontBook;
use crate::markup;
use crate::model::Node;
use crate::style::{PageGeometry, ParagraphStyle};

pub use canvas::{Canvas, GraphicsState};

use layout::{build_paragraph_lines, line_ascent, max_font_size, render_paragraph_lines};
use table::render_table;

/// What the engine tells a page decorator about the page being started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageContext {
    /// 1-based, strictly increasing.
    pub page_number: usize,
    pub width: f32,
    pub height: f32,
}

/// The rectangle content flows into, in PDF coordinates (origin bottom-left).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// Document information dictionary entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PdfInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
    pub creation_date: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageSummary {
    pub number: usize,
    /// Text shown on the page, one entry per drawn string or laid-out line.
    pub text: Vec<String>,
}

/// A finished document: the PDF bytes plus the text placed on each page.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub pages: Vec<PageSummary>,
}

impl RenderedPdf {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text of page `number` (1-based), joined with newlines.
    pub fn page_text(&self, number: usize) -> Option<String> {
        self.pages
            .iter()
            .find(|p| p.number == number)
            .map(|p| p.text.join("\n"))
    }
}

pub type PageCallback<'a> = dyn FnMut(&mut Canvas, &PageContext) -> Result<()> + 'a;

/// Pagination state while nodes are being placed.
pub(crate) struct Flow<'c, 'f> {
    canvas: Canvas<'f>,
    frame: Frame,
    /// Top of the remaining space in the frame.
    cursor: f32,
    page_has_content: bool,
    /// The current page has ended; the next one starts when something is drawn.
    pending_page: bool,
    on_page: &'c mut PageCallback<'c>,
}

impl Flow<'_, '_> {
    fn start_page(&mut self) -> Result<()> {
        let ctx = PageContext {
            page_number: self.canvas.page_number(),
            width: self.canvas.width(),
            height: self.canvas.height(),
        };
        (self.on_page)(&mut self.canvas, &ctx)
    }

    /// End the current page. Nothing is emitted until [`Self::ensure_page`],
    /// so a document never ends on a page holding only decorations.
    pub(crate) fn new_page(&mut self) {
        self.pending_page = true;
        self.cursor = self.frame.top();
        self.page_has_content = false;
    }

    /// Open the page announced by [`Self::new_page`]. Call before drawing.
    pub(crate) fn ensure_page(&mut self) -> Result<()> {
        if !self.pending_page {
            return Ok(());
        }
        self.pending_page = false;
        self.canvas.show_page();
        self.start_page()
    }

    /// Give the whole frame to content when the page holds nothing but spacers.
    /// Returns false when there was no space to reclaim.
    pub(crate) fn reclaim_top(&mut self) -> bool {
        if self.page_has_content || self.cursor >= self.frame.top() - 0.01 {
            return false;
        }
        self.cursor = self.frame.top();
        true
    }

    fn add_spacer(&mut self, height: f32) {
        if self.cursor - height < self.frame.y {
            // A spacer that does not fit ends the page and is dropped.
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn add_paragraph(&mut self, text: &str, style: &ParagraphStyle) -> Result<()> {
        let parsed = markup::parse(text)?;
        let alignment = parsed.align.unwrap_or(style.alignment);
        let pad = if style.back_color.is_some() {
            style.border_padding
        } else {
            0.0
        };
        let text_x = self.frame.x + style.indent_left;
        let text_w = (self.frame.width - style.indent_left).max(0.0);
        let lines = build_paragraph_lines(&parsed, style, self.canvas.fonts(), text_w);
        let font_size = max_font_size(&lines, style.font_size);
        let leading = style.leading.max(font_size * 1.2);

        let mut idx = 0;
        let mut first = true;
        while idx < lines.len() {
            let before = if first && self.page_has_content {
                style.space_before
            } else {
                0.0
            };
            let avail = self.cursor - before - self.frame.y - 2.0 * pad;
            let mut fit = ((avail + 0.01) / leading).floor().max(0.0) as usize;
            fit = fit.min(lines.len() - idx);
            if fit == 0 {
                if self.page_has_content {
                    self.new_page();
                    continue;
                }
                if self.reclaim_top() {
                    continue;
                }
                // Nothing fits on an empty page: place one line anyway.
                fit = 1;
            }

            self.ensure_page()?;
            let top = self.cursor - before;
            let block_h = fit as f32 * leading + 2.0 * pad;
            let ascent = line_ascent(&lines[idx], self.canvas.fonts(), font_size);
            if let Some(color) = style.back_color {
                self.canvas.with_saved_state(|canvas| {
                    canvas.set_fill_color(color);
                    canvas.fill_rect(text_x - pad, top - block_h, text_w + 2.0 * pad, block_h);
                    Ok(())
                })?;
            }
            render_paragraph_lines(
                &mut self.canvas,
                &lines[idx..idx + fit],
                alignment,
                text_x,
                text_w,
                top - pad - ascent,
                leading,
                lines.len(),
                idx,
            )?;

            self.cursor = top - block_h;
            self.page_has_content = true;
            idx += fit;
            first = false;
            if idx < lines.len() {
                self.new_page();
            }
        }
        self.cursor = (self.cursor - style.space_after).max(self.frame.y);
        Ok(())
    }

    fn add(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Paragraph { text, style } => self.add_paragraph(text, style),
            Node::Spacer { height } => {
                self.add_spacer(*height);
                Ok(())
            }
            Node::PageBreak => {
                if self.page_has_content {
                    self.new_page();
                }
                Ok(())
            }
            Node::Table(table) => render_table(self, table),
        }
    }
}

/// Page size, frame and metadata for one document.
pub struct DocTemplate {
    page_width: f32,
    page_height: f32,
    frame: Frame,
    info: PdfInfo,
    fonts: FontBook,
}

impl DocTemplate {
    pub fn new(page: &PageGeometry, frame: Frame, info: PdfInfo, fonts: FontBook) -> Self {
        Self {
            page_width: page.width,
            page_height: page.height,
            frame,
            info,
            fonts,
        }
    }

    /// Lay out `nodes` in order and serialise the document. `on_page` runs once
    /// at the start of every page, before any content of that page is placed.
    pub fn build(
        &mut self,
        nodes: &[Node],
        mut on_page: impl FnMut(&mut Canvas, &PageContext) -> Result<()>,
    ) -> Result<RenderedPdf> {
        let t0 = std::time::Instant::now();

        let pages = {
            let mut flow = Flow {
                canvas: Canvas::new(&mut self.fonts, self.page_width, self.page_height),
                frame: self.frame,
                cursor: self.frame.top(),
                page_has_content: false,
                pending_page: false,
                on_page: &mut on_page,
            };
            flow.start_page()?;
            for node in nodes {
                flow.add(node)?;
            }
            flow.canvas.finish()
        };

        let t_layout = t0.elapsed();

        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };
        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();

        let font_pairs = self.fonts.write_fonts(&mut pdf, &mut alloc)?;

        let t_fonts = t0.elapsed();

        let n = pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        let mut summaries = Vec::with_capacity(n);
        for (i, page) in pages.into_iter().enumerate() {
            let raw = page.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
            summaries.push(PageSummary {
                number: i + 1,
                text: page.text,
            });
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (name, font_ref) in &font_pairs {
                fonts.pair(Name(name.as_bytes()), *font_ref);
            }
        }

        write_info(&mut pdf, info_id, &self.info);

        let t_assembly = t0.elapsed();

        log::info!(
            "Render phases: layout={:.1}ms, font_embed={:.1}ms, assembly={:.1}ms, pages={}",
            t_layout.as_secs_f64() * 1000.0,
            (t_fonts - t_layout).as_secs_f64() * 1000.0,
            (t_assembly - t_fonts).as_secs_f64() * 1000.0,
            n
        );

        Ok(RenderedPdf {
            bytes: pdf.finish(),
            pages: summaries,
        })
    }
}

fn write_info(pdf: &mut Pdf, id: Ref, info: &PdfInfo) {
    let mut doc_info = pdf.document_info(id);
    if !info.title.is_empty() {
        doc_info.title(TextStr(&info.title));
    }
    if !info.author.is_empty() {
        doc_info.author(TextStr(&info.author));
    }
    if !info.subject.is_empty() {
        doc_info.subject(TextStr(&info.subject));
    }
    if !info.creator.is_empty() {
        doc_info.creator(TextStr(&info.creator));
    }
    if let Some(ts) = info.creation_date {
        let date = Date::new(ts.year() as u16)
            .month(ts.month() as u8)
            .day(ts.day() as u8)
            .hour(ts.hour() as u8)
            .minute(ts.minute() as u8)
            .second(ts.second() as u8);
        doc_info.creation_date(date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableNode;
    use crate::style::{BODY, BrandConfig, StyleSheet};

    fn template() -> DocTemplate {
        template_with_height(600.0)
    }

    fn template_with_height(height: f32) -> DocTemplate {
        let page = PageGeometry::letter();
        let frame = Frame::new(54.0, 54.0, page.text_width(), height);
        DocTemplate::new(&page, frame, PdfInfo::default(), FontBook::builtin())
    }

    fn header_table(body_rows: usize) -> TableNode {
        let mut rows = vec![vec!["Col A".to_string(), "Col B".to_string()]];
        rows.extend((1..=body_rows).map(|i| vec![format!("r{i}"), "v".to_string()]));
        let mut table = TableNode::new(rows);
        table.repeat_header = true;
        table
    }

    fn body() -> ParagraphStyle {
        StyleSheet::from_brand(&BrandConfig::default())
            .get(BODY)
            .unwrap()
            .clone()
    }

    #[test]
    fn callback_runs_once_per_page_in_order() {
        let nodes = vec![
            Node::paragraph("one", &body()),
            Node::PageBreak,
            Node::paragraph("two", &body()),
            Node::PageBreak,
            Node::paragraph("three", &body()),
        ];
        let mut seen = Vec::new();
        let out = template()
            .build(&nodes, |_, ctx| {
                seen.push(ctx.page_number);
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(out.page_count(), 3);
        assert!(out.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn page_break_on_empty_page_is_ignored() {
        let nodes = vec![Node::PageBreak, Node::PageBreak, Node::paragraph("x", &body())];
        let out = template().build(&nodes, |_, _| Ok(())).unwrap();
        assert_eq!(out.page_count(), 1);
    }

    #[test]
    fn long_paragraph_splits_across_pages() {
        let text = "lorem ipsum dolor sit amet ".repeat(600);
        let nodes = vec![Node::paragraph(text, &body())];
        let out = template().build(&nodes, |_, _| Ok(())).unwrap();
        assert!(out.page_count() >= 2);
    }

    #[test]
    fn table_rows_split_and_repeat_header() {
        let mut rows = vec![vec!["Header A".to_string(), "Header B".to_string()]];
        rows.extend((0..120).map(|i| vec![format!("row {i}"), "value".to_string()]));
        let mut table = TableNode::new(rows);
        table.repeat_header = true;
        let out = template()
            .build(&[Node::Table(table)], |_, _| Ok(()))
            .unwrap();
        assert!(out.page_count() >= 2);
        for n in 2..=out.page_count() {
            let text = out.page_text(n).unwrap();
            assert!(text.starts_with("Header A"), "page {n}: {text}");
        }
    }

    #[test]
    fn trailing_spacer_and_break_add_no_page() {
        let nodes = vec![
            Node::paragraph("only", &body()),
            Node::Spacer { height: 2000.0 },
            Node::PageBreak,
            Node::Spacer { height: 12.0 },
        ];
        let mut calls = 0;
        let out = template()
            .build(&nodes, |_, _| {
                calls += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(out.page_count(), 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn table_header_stays_with_first_row() {
        let nodes = vec![
            Node::paragraph("intro", &body()),
            Node::Spacer { height: 150.0 },
            Node::Table(header_table(3)),
        ];
        let out = template_with_height(200.0)
            .build(&nodes, |_, _| Ok(()))
            .unwrap();
        assert_eq!(out.page_count(), 2);
        let first = &out.pages[0].text;
        assert!(first.iter().any(|t| t == "intro"));
        assert!(!first.iter().any(|t| t == "Col A"), "{first:?}");
        for page in &out.pages[1..] {
            let headers = page.text.iter().filter(|t| *t == "Col A").count();
            assert_eq!(headers, 1, "page {}: {:?}", page.number, page.text);
        }
        assert!(out.pages[1].text.iter().any(|t| t == "r3"));
    }

    #[test]
    fn spacer_only_page_top_is_reused_for_content() {
        let nodes = vec![
            Node::paragraph("intro", &body()),
            Node::PageBreak,
            Node::Spacer { height: 180.0 },
            Node::Table(header_table(1)),
        ];
        let out = template_with_height(200.0)
            .build(&nodes, |_, _| Ok(()))
            .unwrap();
        assert_eq!(out.page_count(), 2);
        let second = &out.pages[1].text;
        assert!(second.iter().any(|t| t == "Col A"));
        assert!(second.iter().any(|t| t == "r1"));
    }

    #[test]
    fn header_and_row_taller_than_frame_is_a_layout_error() {
        let mut table = header_table(0);
        table
            .rows
            .push(vec!["lorem ipsum ".repeat(400), "v".to_string()]);
        let result = template_with_height(100.0).build(&[Node::Table(table)], |_, _| Ok(()));
        assert!(matches!(result, Err(crate::Error::Layout(ref m)) if m.contains("table row 2")));
    }

    #[test]
    fn callback_errors_propagate() {
        let nodes = vec![Node::paragraph("x", &body())];
        let err = template()
            .build(&nodes, |_, _| Err(crate::Error::Layout("boom".into())))
            .unwrap_err();
        assert!(matches!(err, crate::Error::Layout(ref m) if m == "boom"));
    }
}
