use crate::decor::HeaderFooter;
use crate::error::Result;
use crate::fonts::FontBook;
use crate::model::Node;
use crate::pdf::{DocTemplate, Frame, PdfInfo, RenderedPdf};
use crate::style::{BrandConfig, PageGeometry};

/// The single content frame: inside the margins, below the header band.
pub fn content_frame(page: &PageGeometry) -> Frame {
    Frame::new(
        page.margin_left,
        page.margin_bottom,
        page.width - page.margin_left - page.margin_right,
        page.height - page.margin_top - page.margin_bottom - page.header_band,
    )
}

/// Ties a document template to the page decorations.
pub struct PageComposer<'a> {
    template: DocTemplate,
    decorations: Option<&'a HeaderFooter>,
}

impl<'a> PageComposer<'a> {
    pub fn new(brand: &BrandConfig, decorations: Option<&'a HeaderFooter>, info: PdfInfo) -> Self {
        Self::with_fonts(brand, decorations, info, FontBook::new(brand))
    }

    pub fn with_fonts(
        brand: &BrandConfig,
        decorations: Option<&'a HeaderFooter>,
        info: PdfInfo,
        fonts: FontBook,
    ) -> Self {
        let frame = content_frame(&brand.page);
        Self {
            template: DocTemplate::new(&brand.page, frame, info, fonts),
            decorations,
        }
    }

    pub fn build(&mut self, nodes: &[Node]) -> Result<RenderedPdf> {
        let decorations = self.decorations;
        self.template.build(nodes, |canvas, ctx| match decorations {
            Some(hf) => hf.decorate(canvas, ctx),
            None => Ok(()),
        })
    }
}
