use pdf_writer::{Content, Name, Str};

use crate::error::Result;
use crate::fonts::FontBook;

use super::bidi;

/// Drawing state that page decorations may change and must restore.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphicsState {
    pub stroke_color: [u8; 3],
    pub fill_color: [u8; 3],
    pub line_width: f32,
    /// Font spec (may list `;`-separated candidates) and size.
    pub font: (String, f32),
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            stroke_color: [0, 0, 0],
            fill_color: [0, 0, 0],
            line_width: 1.0,
            font: ("Helvetica".to_string(), 12.0),
        }
    }
}

pub(crate) struct FinishedPage {
    pub content: Content,
    pub text: Vec<String>,
}

fn rgb(c: [u8; 3]) -> (f32, f32, f32) {
    (c[0] as f32 / 255.0, c[1] as f32 / 255.0, c[2] as f32 / 255.0)
}

/// A drawing surface spanning every page of one document. Pages are emitted in
/// order; [`Canvas::show_page`] closes the current one.
pub struct Canvas<'f> {
    fonts: &'f mut FontBook,
    width: f32,
    height: f32,
    page_number: usize,
    content: Content,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    text: Vec<String>,
    pages: Vec<FinishedPage>,
}

impl<'f> Canvas<'f> {
    pub(crate) fn new(fonts: &'f mut FontBook, width: f32, height: f32) -> Self {
        Self {
            fonts,
            width,
            height,
            page_number: 1,
            content: Content::new(),
            state: GraphicsState::default(),
            saved: Vec::new(),
            text: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// 1-based number of the page being drawn.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn graphics_state(&self) -> &GraphicsState {
        &self.state
    }

    pub fn set_stroke_color(&mut self, color: [u8; 3]) {
        let (r, g, b) = rgb(color);
        self.content.set_stroke_rgb(r, g, b);
        self.state.stroke_color = color;
    }

    pub fn set_fill_color(&mut self, color: [u8; 3]) {
        let (r, g, b) = rgb(color);
        self.content.set_fill_rgb(r, g, b);
        self.state.fill_color = color;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.content.set_line_width(width);
        self.state.line_width = width;
    }

    pub fn set_font(&mut self, name: &str, size: f32) {
        self.state.font = (name.to_string(), size);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.content.move_to(x1, y1);
        self.content.line_to(x2, y2);
        self.content.stroke();
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.content.rect(x, y, w, h);
        self.content.fill_nonzero();
    }

    /// Width of `text` in the current font.
    pub fn string_width(&mut self, text: &str) -> f32 {
        let visual = bidi::visual(text);
        let (spec, size) = self.state.font.clone();
        let id = self.fonts.resolve_for_text(&spec, false, false, &visual);
        self.fonts.text_width(id, &visual, size)
    }

    pub fn draw_string(&mut self, x: f32, y: f32, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let visual = bidi::visual(text);
        let (spec, size) = self.state.font.clone();
        let id = self.fonts.resolve_for_text(&spec, false, false, &visual);
        let bytes = self.fonts.encode(id, &visual)?;
        self.content.begin_text();
        self.content
            .set_font(Name(self.fonts.pdf_name(id).as_bytes()), size);
        self.content.next_line(x, y);
        self.content.show(Str(&bytes));
        self.content.end_text();
        self.text.push(text.to_string());
        Ok(())
    }

    pub fn draw_right_string(&mut self, x: f32, y: f32, text: &str) -> Result<()> {
        let w = self.string_width(text);
        self.draw_string(x - w, y, text)
    }

    pub fn draw_centred_string(&mut self, x: f32, y: f32, text: &str) -> Result<()> {
        let w = self.string_width(text);
        self.draw_string(x - w / 2.0, y, text)
    }

    /// Run `f` inside a saved graphics state. The state is restored whether `f`
    /// succeeds or fails.
    pub fn with_saved_state<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.content.save_state();
        self.saved.push(self.state.clone());
        let result = f(self);
        self.content.restore_state();
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
        result
    }

    pub(crate) fn parts(&mut self) -> (&mut Content, &mut FontBook) {
        (&mut self.content, &mut *self.fonts)
    }

    pub(crate) fn fonts(&mut self) -> &mut FontBook {
        &mut *self.fonts
    }

    pub(crate) fn log_text(&mut self, text: String) {
        if !text.is_empty() {
            self.text.push(text);
        }
    }

    /// Close the current page and start drawing on the next one.
    pub(crate) fn show_page(&mut self) {
        let content = std::mem::replace(&mut self.content, Content::new());
        self.pages.push(FinishedPage {
            content,
            text: std::mem::take(&mut self.text),
        });
        self.page_number += 1;
        self.state = GraphicsState::default();
        self.saved.clear();
    }

    /// Close the last page and hand back every page in order.
    pub(crate) fn finish(mut self) -> Vec<FinishedPage> {
        self.pages.push(FinishedPage {
            content: self.content,
            text: std::mem::take(&mut self.text),
        });
        self.pages
    }
}
