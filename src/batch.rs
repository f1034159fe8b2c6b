//! The full BrainSAIT document set, generated in one pass.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::generator::DocumentGenerator;
use crate::style::BrandConfig;
use crate::templates::{self, DocumentSpec};

const PLAN_DEPARTMENTS: [&str; 4] = ["Technology", "Products", "Sales", "Marketing"];

const PROPOSALS: [(&str, &str); 3] = [
    ("Technology", "King Fahad Medical City"),
    ("Sales", "Bupa Arabia Insurance"),
    ("Products", "National Guard Health Affairs"),
];

const POLICIES: [(&str, &str); 5] = [
    ("Administration", "Corporate Governance Policy"),
    ("Technology", "Information Security Policy"),
    ("Human Resources", "Code of Conduct Policy"),
    ("Legal", "Data Protection & Privacy Policy"),
    ("Finance", "Financial Management Policy"),
];

const CAMPAIGNS: [&str; 3] = [
    "Q1 2025 Launch Campaign",
    "Q2 2025 NPHIES Awareness",
    "Q3 2025 Enterprise Growth",
];

/// One document of a batch: what to call it, where to write it, how to build it.
pub struct Job {
    pub label: String,
    pub file_name: String,
    build: Box<dyn Fn() -> DocumentSpec>,
}

impl Job {
    pub fn new(
        label: impl Into<String>,
        file_name: impl Into<String>,
        build: impl Fn() -> DocumentSpec + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            file_name: file_name.into(),
            build: Box::new(build),
        }
    }

    pub fn spec(&self) -> DocumentSpec {
        (self.build)()
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("label", &self.label)
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

fn file_stem(s: &str) -> String {
    s.replace(' ', "_")
}

/// Every document of the standard set, in generation order.
pub fn default_jobs(include_catalog: bool) -> Vec<Job> {
    let mut jobs = Vec::new();

    for dept in PLAN_DEPARTMENTS {
        jobs.push(Job::new(
            format!("{dept} Business Plan"),
            format!("{}_Business_Plan.pdf", file_stem(dept)),
            move || templates::business_plan(dept),
        ));
    }
    for (dept, client) in PROPOSALS {
        jobs.push(Job::new(
            format!("{dept} Proposal for {client}"),
            format!("{}_Proposal_{}.pdf", file_stem(dept), file_stem(client)),
            move || templates::business_proposal(dept, client),
        ));
    }
    for (dept, policy) in POLICIES {
        jobs.push(Job::new(
            format!("{dept}: {policy}"),
            format!("{}_{}.pdf", file_stem(dept), file_stem(policy)),
            move || templates::company_policy(dept, policy),
        ));
    }
    jobs.push(Job::new(
        "Employee Handbook",
        "BrainSAIT_Employee_Handbook.pdf",
        templates::employee_handbook,
    ));
    for campaign in CAMPAIGNS {
        jobs.push(Job::new(
            format!("Marketing Plan: {campaign}"),
            format!("Marketing_Plan_{}.pdf", file_stem(campaign)),
            move || templates::marketing_plan(campaign),
        ));
    }
    if include_catalog {
        jobs.push(Job::new(
            "Templates Catalog",
            "BrainSAIT_Templates_Catalog.pdf",
            templates::template_catalog,
        ));
    }
    jobs
}

/// Outcome of [`run`]. A failed document never aborts the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<PathBuf>,
    pub failed: Vec<(String, Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generate `jobs` into `out_dir`, one after another.
///
/// Only the directory creation can fail the whole run; per-document errors are
/// logged and collected in the report.
pub fn run(brand: &BrandConfig, out_dir: &Path, jobs: &[Job]) -> Result<BatchReport> {
    std::fs::create_dir_all(out_dir)?;
    let generator = DocumentGenerator::new(brand.clone());
    let t0 = Instant::now();
    let mut report = BatchReport::default();

    for (i, job) in jobs.iter().enumerate() {
        log::info!("[{}/{}] {}", i + 1, jobs.len(), job.label);
        let spec = job.spec();
        match generator.generate(out_dir.join(&job.file_name), &spec.info, &spec.sections, true) {
            Ok(path) => report.generated.push(path),
            Err(e) => {
                log::error!("{} failed: {e}", job.label);
                report.failed.push((job.label.clone(), e));
            }
        }
    }

    log::info!(
        "Batch done in {:.1}ms: {} generated, {} failed",
        t0.elapsed().as_secs_f64() * 1000.0,
        report.generated.len(),
        report.failed.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_seventeen_documents() {
        assert_eq!(default_jobs(true).len(), 17);
        assert_eq!(default_jobs(false).len(), 16);
    }

    #[test]
    fn file_names_use_underscores() {
        let jobs = default_jobs(true);
        let names: Vec<&str> = jobs.iter().map(|j| j.file_name.as_str()).collect();
        assert!(names.contains(&"Technology_Business_Plan.pdf"));
        assert!(names.contains(&"Sales_Proposal_Bupa_Arabia_Insurance.pdf"));
        assert!(names.contains(&"Human_Resources_Code_of_Conduct_Policy.pdf"));
        assert!(names.contains(&"Marketing_Plan_Q1_2025_Launch_Campaign.pdf"));
        assert!(names.contains(&"BrainSAIT_Templates_Catalog.pdf"));
        assert!(names.iter().all(|n| !n.contains(' ')));
    }

    #[test]
    fn job_builds_its_document() {
        let jobs = default_jobs(false);
        let spec = jobs[0].spec();
        assert_eq!(spec.info.department, "Technology");
        assert!(!spec.sections.is_empty());
    }
}
