//! Ready-made BrainSAIT documents. Each builder returns the metadata and
//! sections of one document; nothing here touches the filesystem.

mod catalog;
mod handbook;
mod marketing;
mod plan;
mod policy;
mod proposal;

pub use catalog::template_catalog;
pub use handbook::employee_handbook;
pub use marketing::marketing_plan;
pub use plan::business_plan;
pub use policy::company_policy;
pub use proposal::business_proposal;

use crate::model::{DocumentInfo, SectionDescriptor, TableDescriptor};
use crate::style::INCH;

/// Departments and their Arabic names.
pub const DEPARTMENTS: [(&str, &str); 10] = [
    ("Administration", "الإدارة"),
    ("Finance", "المالية"),
    ("Human Resources", "الموارد البشرية"),
    ("Legal", "القانونية"),
    ("Marketing", "التسويق"),
    ("Operations", "العمليات"),
    ("Products", "المنتجات"),
    ("Sales", "المبيعات"),
    ("Service", "الخدمة"),
    ("Technology", "التقنية"),
];

/// Arabic name of a department, or the name itself when unknown.
pub fn department_localized(department: &str) -> &str {
    DEPARTMENTS
        .iter()
        .find(|(en, _)| *en == department)
        .map(|(_, ar)| *ar)
        .unwrap_or(department)
}

/// Everything needed to generate one document.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSpec {
    pub info: DocumentInfo,
    pub sections: Vec<SectionDescriptor>,
}

fn section(title: &str, title_localized: &str, body: &[&str]) -> SectionDescriptor {
    SectionDescriptor::new(title)
        .localized(title_localized)
        .body(body.iter().copied())
}

fn table(headers: &[&str], rows: &[&[&str]], widths_in: &[f32]) -> TableDescriptor {
    TableDescriptor::new(headers.iter().copied(), rows.iter().map(|r| r.iter().copied()))
        .with_col_widths(widths_in.iter().map(|w| w * INCH).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_department_names() {
        assert_eq!(department_localized("Finance"), "المالية");
        assert_eq!(department_localized("Research"), "Research");
    }

    #[test]
    fn every_template_validates() {
        let brand = crate::style::BrandConfig::default();
        let styles = crate::style::StyleSheet::from_brand(&brand);
        let assembler = crate::assemble::ContentAssembler::new(&brand, &styles);
        let specs = [
            business_plan("Technology"),
            business_proposal("Sales", "Bupa Arabia Insurance"),
            company_policy("Legal", "Data Protection & Privacy Policy"),
            employee_handbook(),
            marketing_plan("Q2 2025 NPHIES Awareness"),
            template_catalog(),
        ];
        for spec in &specs {
            for s in &spec.sections {
                assembler.validate(s).unwrap();
            }
        }
    }
}
