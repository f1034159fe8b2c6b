use crate::model::{DocumentInfo, SectionDescriptor};

use super::{DocumentSpec, department_localized, section, table};

/// Three-year business plan for one department, with a financial projection table.
pub fn business_plan(department: &str) -> DocumentSpec {
    let dept_ar = department_localized(department);
    let info = DocumentInfo::new(
        format!("BrainSAIT {department} Business Plan 2025-2027"),
        "Business Plan",
        department,
    )
    .localized(format!("خطة عمل {dept_ar} برين سايت 2025-2027"))
    .classification("CONFIDENTIAL - INTERNAL USE ONLY")
    .version("1.0");

    let summary = format!(
        "This business plan outlines the strategic direction, objectives, and operational \
         framework for the BrainSAIT {department} department for the period 2025-2027. Our \
         mission is to deliver cutting-edge healthcare AI solutions that comply with \
         international standards including HIPAA and NPHIES."
    );

    let sections: Vec<SectionDescriptor> = vec![
        section(
            "Executive Summary",
            "الملخص التنفيذي",
            &[
                summary.as_str(),
                "<b>Key Objectives:</b> Drive innovation in healthcare technology, expand market \
                 presence in the Saudi Arabian healthcare sector, and maintain the highest \
                 standards of data security and patient privacy.",
            ],
        ),
        section(
            "Market Analysis",
            "تحليل السوق",
            &[
                "<b>Market Opportunity:</b> The Saudi Arabian healthcare IT market is projected \
                 to grow at 12.5% CAGR through 2027, driven by Vision 2030 digital \
                 transformation initiatives and NPHIES mandates.",
                "<b>Target Market:</b> Healthcare providers, insurance companies, government \
                 health organizations, and private clinics across Saudi Arabia and the broader \
                 MENA region.",
                "<b>Competitive Advantages:</b> Bilingual AI capabilities, NPHIES-native \
                 integration, HIPAA compliance, and deep healthcare domain expertise.",
            ],
        ),
        section(
            "Strategic Objectives",
            "الأهداف الاستراتيجية",
            &[
                "<b>Year 1 (2025):</b> Establish market presence with 25+ healthcare clients, \
                 achieve 500K+ processed claims, and build comprehensive NPHIES integration suite.",
                "<b>Year 2 (2026):</b> Expand to 75+ clients, launch AI-powered clinical decision \
                 support tools, and achieve ISO 27001 certification.",
                "<b>Year 3 (2027):</b> Scale to 150+ clients across MENA, introduce predictive \
                 analytics suite, and establish strategic partnerships with major EMR vendors.",
            ],
        ),
        section(
            "Financial Projections",
            "التوقعات المالية",
            &["Financial projections are based on conservative growth estimates and proven \
               market demand for healthcare AI solutions."],
        )
        .table(table(
            &["Metric", "2025", "2026", "2027"],
            &[
                &["Revenue (SAR)", "5.2M", "12.8M", "28.5M"],
                &["Gross Margin", "72%", "75%", "78%"],
                &["EBITDA", "1.8M", "5.1M", "13.2M"],
                &["Active Clients", "25", "75", "150"],
                &["Team Size", "35", "65", "120"],
            ],
            &[2.5, 1.5, 1.5, 1.5],
        )),
        section(
            "Operational Strategy",
            "الاستراتيجية التشغيلية",
            &[
                "<b>Technology Stack:</b> Cloud-native architecture on AWS/Azure, microservices \
                 with FastAPI, React/Next.js frontend, and comprehensive AI/ML pipeline.",
                "<b>Compliance Framework:</b> HIPAA-compliant infrastructure, NPHIES \
                 certification, SOC 2 Type II audit readiness, and ISO 27001 preparation.",
                "<b>Quality Assurance:</b> Automated testing with 95%+ coverage, continuous \
                 integration/deployment, and monthly security audits.",
            ],
        ),
        section(
            "Risk Management",
            "إدارة المخاطر",
            &[
                "<b>Technical Risks:</b> Regular system audits, redundant infrastructure, \
                 disaster recovery plans, and 99.9% uptime SLA.",
                "<b>Compliance Risks:</b> Dedicated compliance team, quarterly external audits, \
                 comprehensive audit logging, and proactive regulatory monitoring.",
                "<b>Market Risks:</b> Diversified client portfolio, flexible pricing models, \
                 continuous product innovation, and strong customer relationships.",
            ],
        ),
    ];

    DocumentSpec { info, sections }
}
