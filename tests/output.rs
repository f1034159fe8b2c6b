mod common;

use docbrand_pdf::batch::{self, Job};
use docbrand_pdf::templates::DocumentSpec;
use docbrand_pdf::{DocumentInfo, Error, SectionDescriptor};

fn sample_spec() -> DocumentSpec {
    DocumentSpec {
        info: common::sample_info(),
        sections: common::sample_sections(),
    }
}

fn broken_spec() -> DocumentSpec {
    DocumentSpec {
        info: DocumentInfo::new("Broken", "Business Plan", "Finance").generated_at(common::fixed_time()),
        sections: vec![SectionDescriptor::new("Nested too deep").level(3)],
    }
}

#[test]
fn generate_writes_pdf_to_requested_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("review.pdf");
    let written = docbrand_pdf::generate(
        &common::latin_brand(),
        &out,
        &common::sample_info(),
        &common::sample_sections(),
        true,
    )
    .unwrap();

    assert_eq!(written, out);
    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1, "temporary file left behind");
}

#[test]
fn failed_generation_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("broken.pdf");
    let spec = broken_spec();
    let result = docbrand_pdf::generate(
        &common::latin_brand(),
        &out,
        &spec.info,
        &spec.sections,
        true,
    );

    assert!(matches!(result, Err(Error::Configuration(_))));
    assert!(!out.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn failed_generation_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.pdf");
    std::fs::write(&out, b"previous").unwrap();
    let spec = broken_spec();
    let result = docbrand_pdf::generate(
        &common::latin_brand(),
        &out,
        &spec.info,
        &spec.sections,
        false,
    );

    assert!(result.is_err());
    assert_eq!(std::fs::read(&out).unwrap(), b"previous");
}

#[test]
fn batch_continues_past_failed_documents() {
    common::init_logging();
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("docs");
    let jobs = vec![
        Job::new("First", "first.pdf", sample_spec),
        Job::new("Broken", "broken.pdf", broken_spec),
        Job::new("Last", "last.pdf", sample_spec),
    ];

    let report = batch::run(&common::latin_brand(), &out_dir, &jobs).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.generated, vec![out_dir.join("first.pdf"), out_dir.join("last.pdf")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "Broken");
    assert!(matches!(report.failed[0].1, Error::Configuration(_)));
    assert!(out_dir.join("last.pdf").exists());
    assert!(!out_dir.join("broken.pdf").exists());
}

#[test]
fn batch_reports_unencodable_documents() {
    let dir = tempfile::tempdir().unwrap();
    let jobs = batch::default_jobs(false)
        .into_iter()
        .filter(|j| j.file_name == "BrainSAIT_Employee_Handbook.pdf")
        .collect::<Vec<_>>();
    assert_eq!(jobs.len(), 1);

    // The handbook has Arabic headings; the Latin-only brand cannot encode them.
    let report = batch::run(&common::latin_brand(), dir.path(), &jobs).unwrap();
    assert!(report.generated.is_empty());
    assert!(matches!(report.failed[0].1, Error::Layout(_)));

    let mut brand = common::latin_brand();
    brand.substitute_missing_glyphs = true;
    let report = batch::run(&brand, dir.path(), &jobs).unwrap();
    assert!(report.is_success());
    assert_eq!(report.generated.len(), 1);
}
