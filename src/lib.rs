mod assemble;
pub mod batch;
mod compose;
mod decor;
mod error;
mod fonts;
mod generator;
mod markup;
pub mod model;
pub mod pdf;
pub mod style;
pub mod templates;

pub use assemble::ContentAssembler;
pub use compose::{PageComposer, content_frame};
pub use decor::{DEFAULT_CLASSIFICATION, HeaderFooter};
pub use error::{Error, Result};
pub use fonts::FontBook;
pub use generator::{DocumentGenerator, generate};
pub use model::{
    Alignment, CellRange, CellVAlign, ContentItem, DocumentInfo, Node, SectionDescriptor,
    TableCommand, TableDescriptor, TableNode,
};
pub use pdf::{Canvas, DocTemplate, Frame, PageContext, PdfInfo, RenderedPdf};
pub use style::{BrandConfig, PageGeometry, ParagraphStyle, StyleSheet};
