#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use docbrand_pdf::{BrandConfig, DocumentInfo, SectionDescriptor, TableDescriptor};

/// Brand that only needs the built-in Helvetica family, so layout does not
/// depend on which fonts the machine has installed.
pub fn latin_brand() -> BrandConfig {
    let mut brand = BrandConfig::default();
    brand.typography.arabic_font = "Helvetica".into();
    brand.identity.company_name_localized = "BrainSAIT KSA".into();
    brand.identity.security_classification_localized = "Confidential - HIPAA".into();
    brand
}

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .and_then(|d| d.and_hms_opt(10, 30, 0))
        .expect("valid timestamp")
}

pub fn sample_info() -> DocumentInfo {
    DocumentInfo::new("Quarterly Operations Review", "Business Plan", "Operations")
        .classification("CONFIDENTIAL - TEST")
        .generated_at(fixed_time())
}

pub fn sample_sections() -> Vec<SectionDescriptor> {
    vec![
        SectionDescriptor::new("Overview").body([
            "Operations delivered <b>all</b> planned milestones this quarter.",
            "Headcount grew in line with the hiring plan.",
        ]),
        SectionDescriptor::new("Budget")
            .level(2)
            .body(["Spending by category:"])
            .table(TableDescriptor::new(
                ["Category", "Q1", "Q2"],
                [["Staff", "120", "130"], ["Cloud", "40", "45"]],
            )),
    ]
}

pub const LONG_PARAGRAPH: &str = "Every department reviews its objectives each quarter and \
                                  records the outcome, the blockers it met and the support it \
                                  needs from the rest of the organisation. The review feeds \
                                  into the annual plan.";

/// Enough body text to spill over several pages.
pub fn long_sections(count: usize) -> Vec<SectionDescriptor> {
    (1..=count)
        .map(|i| SectionDescriptor::new(format!("Section {i}")).body([LONG_PARAGRAPH; 6]))
        .collect()
}

/// Route library logs through the test harness. `RUST_LOG=debug` shows them.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
