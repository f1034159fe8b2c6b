//! Branded page decorations: the header band and the footer strip drawn on
//! every page.

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::pdf::{Canvas, PageContext};
use crate::style::{BrandConfig, INCH};

pub const DEFAULT_CLASSIFICATION: &str = "INTERNAL USE";

pub struct HeaderFooter {
    brand: BrandConfig,
    document_type: String,
    department: String,
    classification: String,
    show_watermark: bool,
    generated_at: NaiveDateTime,
}

impl HeaderFooter {
    pub fn new(
        brand: &BrandConfig,
        document_type: impl Into<String>,
        department: impl Into<String>,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            brand: brand.clone(),
            document_type: document_type.into(),
            department: department.into(),
            classification: DEFAULT_CLASSIFICATION.to_string(),
            show_watermark: false,
            generated_at,
        }
    }

    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = classification.into();
        self
    }

    /// Recorded for callers; no watermark is drawn.
    pub fn with_watermark(mut self, show: bool) -> Self {
        self.show_watermark = show;
        self
    }

    pub fn classification(&self) -> &str {
        &self.classification
    }

    pub fn show_watermark(&self) -> bool {
        self.show_watermark
    }

    pub fn header(&self, canvas: &mut Canvas, ctx: &PageContext) -> Result<()> {
        let colors = &self.brand.palette;
        let fonts = &self.brand.typography;
        let left = self.brand.page.margin_left;
        let right = ctx.width - self.brand.page.margin_right;
        let top = ctx.height;

        canvas.with_saved_state(|c| {
            c.set_stroke_color(colors.medical_blue);
            c.set_line_width(3.0);
            c.line(0.0, top - 0.40 * INCH, ctx.width, top - 0.40 * INCH);

            c.set_stroke_color(colors.signal_teal);
            c.set_line_width(1.0);
            c.line(0.0, top - 0.42 * INCH, ctx.width, top - 0.42 * INCH);

            c.set_font(&fonts.title_font, 16.0);
            c.set_fill_color(colors.midnight_blue);
            c.draw_string(left, top - 0.30 * INCH, &self.brand.identity.company_name)?;

            c.set_font(&fonts.arabic_font, 14.0);
            c.draw_right_string(
                right,
                top - 0.30 * INCH,
                &self.brand.identity.company_name_localized,
            )?;

            c.set_font(&fonts.body_font, 10.0);
            c.set_fill_color(colors.professional_gray);
            c.draw_string(
                left,
                top - 0.55 * INCH,
                &format!("{} | {}", self.document_type, self.department),
            )
        })
    }

    pub fn footer(&self, canvas: &mut Canvas, ctx: &PageContext) -> Result<()> {
        let colors = &self.brand.palette;
        let fonts = &self.brand.typography;
        let left = self.brand.page.margin_left;
        let right = ctx.width - self.brand.page.margin_right;
        let center = ctx.width / 2.0;

        canvas.with_saved_state(|c| {
            c.set_font(&fonts.body_bold_font, fonts.size_footer);
            c.set_fill_color(colors.deep_orange);
            c.draw_centred_string(center, 0.5 * INCH, &self.classification)?;

            c.set_font(&fonts.body_font, 9.0);
            c.set_fill_color(colors.professional_gray);
            let page_line = format!(
                "Page {} | Generated: {}",
                ctx.page_number,
                self.generated_at.format("%Y-%m-%d %H:%M")
            );
            c.draw_centred_string(center, 0.35 * INCH, &page_line)?;

            c.set_font(&fonts.body_font, 7.0);
            c.draw_string(left, 0.35 * INCH, &format!("OID: {}", self.brand.identity.oid))?;
            c.draw_right_string(right, 0.35 * INCH, &self.brand.identity.compliance_badge)?;

            c.set_stroke_color(colors.border_gray);
            c.set_line_width(1.0);
            c.line(0.0, 0.6 * INCH, ctx.width, 0.6 * INCH);
            Ok(())
        })
    }

    /// Header then footer; the per-page callback.
    pub fn decorate(&self, canvas: &mut Canvas, ctx: &PageContext) -> Result<()> {
        if ctx.page_number == 1 && self.show_watermark {
            log::debug!("Watermark requested for {}; not drawn", self.document_type);
        }
        self.header(canvas, ctx)?;
        self.footer(canvas, ctx)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::error::Error;
    use crate::fonts::FontBook;
    use crate::pdf::GraphicsState;

    fn brand() -> BrandConfig {
        let mut brand = BrandConfig::default();
        brand.typography.arabic_font = "Helvetica".into();
        brand.identity.company_name_localized = "BrainSAIT KSA".into();
        brand
    }

    fn decorations(brand: &BrandConfig) -> HeaderFooter {
        let at = NaiveDate::from_ymd_opt(2025, 1, 15)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap();
        HeaderFooter::new(brand, "Business Plan", "Finance", at)
    }

    fn ctx() -> PageContext {
        PageContext {
            page_number: 1,
            width: 612.0,
            height: 792.0,
        }
    }

    /// Text drawn on one decorated page.
    fn decorated_text(hf: &HeaderFooter) -> Vec<String> {
        let mut fonts = FontBook::builtin();
        let mut canvas = Canvas::new(&mut fonts, 612.0, 792.0);
        hf.decorate(&mut canvas, &ctx()).unwrap();
        canvas.finish().remove(0).text
    }

    #[test]
    fn header_and_footer_leave_graphics_state_untouched() {
        let brand = brand();
        let hf = decorations(&brand);
        let mut fonts = FontBook::builtin();
        let mut canvas = Canvas::new(&mut fonts, 612.0, 792.0);
        canvas.set_fill_color([10, 20, 30]);
        canvas.set_font("Helvetica-Bold", 13.0);
        let before = canvas.graphics_state().clone();

        hf.header(&mut canvas, &ctx()).unwrap();
        assert_eq!(canvas.graphics_state(), &before);
        hf.footer(&mut canvas, &ctx()).unwrap();
        assert_eq!(canvas.graphics_state(), &before);
    }

    #[test]
    fn failed_drawing_still_restores_state() {
        let mut fonts = FontBook::builtin();
        let mut canvas = Canvas::new(&mut fonts, 612.0, 792.0);
        let result: Result<()> = canvas.with_saved_state(|c| {
            c.set_fill_color([200, 0, 0]);
            c.set_line_width(4.0);
            Err(Error::Layout("glyph missing".into()))
        });

        assert!(matches!(result, Err(Error::Layout(_))));
        assert_eq!(canvas.graphics_state(), &GraphicsState::default());
    }

    #[test]
    fn watermark_flag_draws_nothing() {
        let brand = brand();
        let plain = decorations(&brand);
        let marked = decorations(&brand).with_watermark(true);
        assert!(marked.show_watermark());
        assert_eq!(decorated_text(&plain), decorated_text(&marked));
    }

    #[test]
    fn footer_lists_classification_and_page_line() {
        let brand = brand();
        let hf = decorations(&brand).with_classification("RESTRICTED");
        let text = decorated_text(&hf);
        assert!(text.iter().any(|t| t == "RESTRICTED"));
        assert!(text.iter().any(|t| t == "Page 1 | Generated: 2025-01-15 10:30"));
        assert!(text.iter().any(|t| t == "Business Plan | Finance"));
    }
}
