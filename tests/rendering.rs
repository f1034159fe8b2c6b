mod common;

use docbrand_pdf::{
    DocumentGenerator, Error, HeaderFooter, PageComposer, PdfInfo, SectionDescriptor, StyleSheet,
    TableDescriptor,
};

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|w| w == needle.as_bytes())
}

#[test]
fn rendered_document_is_a_pdf_with_metadata() {
    let generator = DocumentGenerator::new(common::latin_brand());
    let rendered = generator
        .render(&common::sample_info(), &common::sample_sections(), true)
        .unwrap();

    assert!(rendered.bytes.starts_with(b"%PDF-"));
    assert!(contains(&rendered.bytes, "Quarterly Operations Review"));
    assert!(contains(&rendered.bytes, "Business Plan - Operations"));
    assert!(contains(&rendered.bytes, "BrainSAIT Document System"));
    assert!(contains(&rendered.bytes, "/FlateDecode"));
    assert_eq!(rendered.page_count(), 2);
}

#[test]
fn page_numbers_run_from_one_without_gaps() {
    common::init_logging();
    let generator = DocumentGenerator::new(common::latin_brand());
    let rendered = generator
        .render(&common::sample_info(), &common::long_sections(8), true)
        .unwrap();

    let n = rendered.page_count();
    assert!(n >= 3, "expected several pages, got {n}");
    for (i, page) in rendered.pages.iter().enumerate() {
        assert_eq!(page.number, i + 1);
        let text = rendered.page_text(page.number).unwrap();
        let footer = format!("Page {} | Generated: 2025-01-15 10:30", i + 1);
        assert!(text.contains(&footer), "page {} lacks footer: {text}", i + 1);
    }
}

#[test]
fn every_page_carries_header_and_classification() {
    let generator = DocumentGenerator::new(common::latin_brand());
    let rendered = generator
        .render(&common::sample_info(), &common::long_sections(5), true)
        .unwrap();

    for page in &rendered.pages {
        let text = page.text.join("\n");
        assert!(text.contains("CONFIDENTIAL - TEST"));
        assert!(text.contains("BrainSAIT"));
        assert!(text.contains("BrainSAIT KSA"));
        assert!(text.contains("Business Plan | Operations"));
        assert!(text.contains("OID: 1.3.6.1.4.1.61026"));
        assert!(text.contains("HIPAA | NPHIES Compliant"));
    }
}

#[test]
fn cover_goes_on_its_own_page() {
    let generator = DocumentGenerator::new(common::latin_brand());
    let rendered = generator
        .render(&common::sample_info(), &common::sample_sections(), true)
        .unwrap();

    let first = rendered.page_text(1).unwrap();
    assert!(first.contains("Quarterly Operations Review"));
    assert!(first.contains("January 15, 2025"));
    assert!(!first.contains("Overview"));
    assert!(rendered.page_text(2).unwrap().contains("Overview"));
}

#[test]
fn no_cover_means_no_title_on_first_page() {
    let generator = DocumentGenerator::new(common::latin_brand());
    let rendered = generator
        .render(&common::sample_info(), &common::sample_sections(), false)
        .unwrap();

    assert_eq!(rendered.page_count(), 1);
    let first = rendered.page_text(1).unwrap();
    assert!(!first.contains("Quarterly Operations Review"));
    assert!(first.contains("Overview"));
    assert!(first.contains("Staff"));
}

#[test]
fn cover_without_sections_is_a_single_page() {
    let generator = DocumentGenerator::new(common::latin_brand());
    let rendered = generator.render(&common::sample_info(), &[], true).unwrap();

    assert_eq!(rendered.page_count(), 1);
    assert!(rendered.page_text(1).unwrap().contains("Quarterly Operations Review"));
}

#[test]
fn last_page_always_holds_body_text() {
    let words: Vec<&str> = common::LONG_PARAGRAPH.split_whitespace().collect();
    let generator = DocumentGenerator::new(common::latin_brand());
    for count in 1..=6 {
        let rendered = generator
            .render(&common::sample_info(), &common::long_sections(count), true)
            .unwrap();
        let last = &rendered.pages[rendered.page_count() - 1];
        let has_body = last.text.iter().any(|line| {
            line.starts_with("Section ")
                || line.split_whitespace().all(|w| words.contains(&w))
        });
        assert!(has_body, "{count} sections end on a bare page: {:?}", last.text);
    }
}

#[test]
fn output_is_deterministic_for_fixed_timestamp() {
    let generator = DocumentGenerator::new(common::latin_brand());
    let a = generator
        .render(&common::sample_info(), &common::sample_sections(), true)
        .unwrap();
    let b = generator
        .render(&common::sample_info(), &common::sample_sections(), true)
        .unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn long_table_repeats_its_header() {
    let rows: Vec<Vec<String>> = (1..=80)
        .map(|i| vec![format!("Item {i}"), format!("{}", i * 10)])
        .collect();
    let sections = vec![
        SectionDescriptor::new("Inventory")
            .body(["Stock levels by item."])
            .table(TableDescriptor::new(["Item", "Units"], rows)),
    ];
    let generator = DocumentGenerator::new(common::latin_brand());
    let rendered = generator
        .render(&common::sample_info(), &sections, false)
        .unwrap();

    assert!(rendered.page_count() >= 2);
    for page in &rendered.pages {
        assert!(page.text.iter().any(|t| t == "Units"), "page {}", page.number);
    }
    let last = rendered.page_text(rendered.page_count()).unwrap();
    assert!(last.contains("Item 80"));
}

#[test]
fn too_wide_table_fails_layout() {
    let sections = vec![SectionDescriptor::new("Wide").table(
        TableDescriptor::new(["A", "B"], [["1", "2"]]).with_col_widths(vec![400.0, 400.0]),
    )];
    let generator = DocumentGenerator::new(common::latin_brand());
    assert!(matches!(
        generator.render(&common::sample_info(), &sections, false),
        Err(Error::Layout(_))
    ));
}

#[test]
fn arabic_text_without_a_capable_font_fails() {
    let sections = vec![SectionDescriptor::new("Welcome").localized("مرحبا")];
    let generator = DocumentGenerator::new(common::latin_brand());
    assert!(matches!(
        generator.render(&common::sample_info(), &sections, false),
        Err(Error::Layout(_))
    ));
}

#[test]
fn missing_glyphs_can_be_substituted() {
    let mut brand = common::latin_brand();
    brand.substitute_missing_glyphs = true;
    let sections = vec![SectionDescriptor::new("Welcome").localized("مرحبا")];
    let rendered = DocumentGenerator::new(brand)
        .render(&common::sample_info(), &sections, false)
        .unwrap();
    assert_eq!(rendered.page_count(), 1);
}

#[test]
fn every_template_renders_with_substitution() {
    common::init_logging();
    let mut brand = common::latin_brand();
    brand.substitute_missing_glyphs = true;
    let generator = DocumentGenerator::new(brand);
    let specs = [
        docbrand_pdf::templates::business_plan("Finance"),
        docbrand_pdf::templates::business_proposal("Sales", "Bupa Arabia Insurance"),
        docbrand_pdf::templates::company_policy("Legal", "Data Protection & Privacy Policy"),
        docbrand_pdf::templates::employee_handbook(),
        docbrand_pdf::templates::marketing_plan("Q3 2025 Enterprise Growth"),
        docbrand_pdf::templates::template_catalog(),
    ];
    for spec in specs {
        let info = spec.info.generated_at(common::fixed_time());
        let rendered = generator.render(&info, &spec.sections, true).unwrap();
        assert!(rendered.page_count() >= 2, "{}", info.title);
        assert!(rendered.page_text(1).unwrap().contains(&info.classification));
    }
}

#[test]
fn composer_without_decorations_draws_only_content() {
    let brand = common::latin_brand();
    let styles = StyleSheet::from_brand(&brand);
    let nodes = docbrand_pdf::ContentAssembler::new(&brand, &styles)
        .assemble(&common::sample_info(), &common::sample_sections(), false)
        .unwrap();

    let mut composer = PageComposer::new(&brand, None, PdfInfo::default());
    let plain = composer.build(&nodes).unwrap();
    assert!(!plain.page_text(1).unwrap().contains("OID:"));

    let decorations = HeaderFooter::new(&brand, "Business Plan", "Operations", common::fixed_time());
    assert_eq!(decorations.classification(), docbrand_pdf::DEFAULT_CLASSIFICATION);
    let mut composer = PageComposer::new(&brand, Some(&decorations), PdfInfo::default());
    let decorated = composer.build(&nodes).unwrap();
    let text = decorated.page_text(1).unwrap();
    assert!(text.contains("OID:"));
    assert!(text.contains("INTERNAL USE"));
}
