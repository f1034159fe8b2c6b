use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assemble::ContentAssembler;
use crate::compose::PageComposer;
use crate::decor::HeaderFooter;
use crate::error::{Error, Result};
use crate::fonts::FontBook;
use crate::model::{DocumentInfo, SectionDescriptor};
use crate::pdf::{PdfInfo, RenderedPdf};
use crate::style::{BrandConfig, StyleSheet};

/// Produces branded documents for one brand. Every call builds its own style
/// sheet, decorations and font book; nothing is shared between documents.
#[derive(Clone, Debug, Default)]
pub struct DocumentGenerator {
    brand: BrandConfig,
}

impl DocumentGenerator {
    pub fn new(brand: BrandConfig) -> Self {
        Self { brand }
    }

    pub fn brand(&self) -> &BrandConfig {
        &self.brand
    }

    fn pdf_info(&self, info: &DocumentInfo) -> PdfInfo {
        PdfInfo {
            title: info.title.clone(),
            author: info.author.clone(),
            subject: info.subject(),
            creator: format!("{} Document System", self.brand.identity.company_name),
            creation_date: Some(info.generated_at),
        }
    }

    /// Lay out a document in memory.
    pub fn render(
        &self,
        info: &DocumentInfo,
        sections: &[SectionDescriptor],
        include_cover: bool,
    ) -> Result<RenderedPdf> {
        let t0 = Instant::now();

        let styles = StyleSheet::from_brand(&self.brand);
        let nodes =
            ContentAssembler::new(&self.brand, &styles).assemble(info, sections, include_cover)?;
        let t_assemble = t0.elapsed();

        let decorations = HeaderFooter::new(
            &self.brand,
            info.document_type.as_str(),
            info.department.as_str(),
            info.generated_at,
        )
        .with_classification(info.classification.as_str());
        let fonts = FontBook::new(&self.brand);
        let mut composer =
            PageComposer::with_fonts(&self.brand, Some(&decorations), self.pdf_info(info), fonts);
        let rendered = composer.build(&nodes)?;
        let t_total = t0.elapsed();

        log::info!(
            "Timing: assemble={:.1}ms, build={:.1}ms, total={:.1}ms ({} nodes, {} pages, {} bytes)",
            t_assemble.as_secs_f64() * 1000.0,
            (t_total - t_assemble).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            nodes.len(),
            rendered.page_count(),
            rendered.bytes.len(),
        );
        Ok(rendered)
    }

    /// Render and write to `output`. The file appears only once the whole
    /// document has been built and written.
    pub fn generate(
        &self,
        output: impl AsRef<Path>,
        info: &DocumentInfo,
        sections: &[SectionDescriptor],
        include_cover: bool,
    ) -> Result<PathBuf> {
        let output = output.as_ref();
        let rendered = self.render(info, sections, include_cover)?;
        write_atomically(output, &rendered.bytes)?;
        log::info!(
            "Wrote {} ({} pages, {} bytes)",
            output.display(),
            rendered.page_count(),
            rendered.bytes.len()
        );
        Ok(output.to_path_buf())
    }
}

/// One-shot convenience around [`DocumentGenerator::generate`].
pub fn generate(
    brand: &BrandConfig,
    output: impl AsRef<Path>,
    info: &DocumentInfo,
    sections: &[SectionDescriptor],
    include_cover: bool,
) -> Result<PathBuf> {
    DocumentGenerator::new(brand.clone()).generate(output, info, sections, include_cover)
}

/// Write through a sibling temporary file renamed over `path`, so readers
/// never observe a partial PDF.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Validation(format!("output path {} has no file name", path.display())))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let tmp = dir.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    ));
    let result = std::fs::write(&tmp, bytes).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::Io(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_target_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        std::fs::write(&target, b"old").unwrap();
        write_atomically(&target, b"%PDF-new").unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-new");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn atomic_write_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.pdf");
        assert!(matches!(write_atomically(&target, b"x"), Err(Error::Io(_))));
        assert!(!target.exists());
    }
}
