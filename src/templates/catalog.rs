use crate::model::DocumentInfo;

use super::{DocumentSpec, section, table};

/// Sales catalog of every template category and department package.
pub fn template_catalog() -> DocumentSpec {
    let info = DocumentInfo::new(
        "BrainSAIT Document Templates Catalog",
        "Template Catalog",
        "All Departments",
    )
    .localized("كتالوج قوالب وثائق برين سايت")
    .classification("SALES MATERIAL - FOR DISTRIBUTION")
    .version("1.0");

    let sections = vec![
        section(
            "About BrainSAIT Document Templates",
            "حول قوالب وثائق برين سايت",
            &[
                "BrainSAIT Document Templates provide a comprehensive suite of professional, \
                 HIPAA-compliant, bilingual business documents designed specifically for \
                 healthcare technology organizations operating in Saudi Arabia and the MENA \
                 region.",
                "<b>Key Features:</b>",
                "• Fully bilingual (Arabic/English) with RTL/LTR support",
                "• HIPAA-compliant document structures and security classifications",
                "• NPHIES-ready templates for healthcare providers and insurers",
                "• Professional glass morphism design with BrainSAIT branding",
                "• Automated generation with customization options",
                "• Version control and audit trail capabilities",
            ],
        ),
        section(
            "Document Categories",
            "فئات الوثائق",
            &["Our template library covers all essential business document types across 10 \
               departments:"],
        )
        .table(table(
            &["Category", "Templates Available", "Use Cases"],
            &[
                &["Business Plans", "10", "Strategic planning, investor presentations"],
                &["Business Proposals", "15", "Client proposals, partnership agreements"],
                &["Company Policies", "25", "HR policies, security policies, compliance"],
                &["Business Agreements", "20", "Contracts, NDAs, service agreements"],
                &["Business Procedures", "30", "SOPs, workflows, process documentation"],
                &["Business Checklists", "15", "Quality assurance, compliance audits"],
                &["Business Guides", "12", "User guides, training manuals"],
                &["Business Forms", "40", "HR forms, request forms, evaluation forms"],
                &["Business Letters", "10", "Official correspondence, announcements"],
                &["Press Releases", "5", "Media releases, company announcements"],
            ],
            &[1.8, 1.2, 3.0],
        )),
        section(
            "Department Coverage",
            "التغطية حسب القسم",
            &[
                "All templates are available customized for each department:",
                "• <b>Administration:</b> Corporate governance, policies, procedures",
                "• <b>Finance:</b> Financial policies, budgets, reporting templates",
                "• <b>Human Resources:</b> Employee handbook, policies, evaluation forms",
                "• <b>Legal:</b> Contracts, agreements, compliance documentation",
                "• <b>Marketing:</b> Marketing plans, campaign materials, brand guides",
                "• <b>Operations:</b> Process documentation, SOPs, workflow guides",
                "• <b>Products:</b> Product documentation, roadmaps, specifications",
                "• <b>Sales:</b> Proposals, presentations, sales playbooks",
                "• <b>Service:</b> Service agreements, SLAs, support documentation",
                "• <b>Technology:</b> Technical specifications, architecture docs, API guides",
            ],
        ),
        section(
            "Pricing and Licensing",
            "التسعير والترخيص",
            &[
                "<b>Individual Templates:</b> SAR 500 per template",
                "<b>Department Package:</b> SAR 3,500 (all templates for one department)",
                "<b>Complete Suite:</b> SAR 25,000 (all templates, all departments)",
                "<b>Custom Development:</b> Starting at SAR 2,000 per custom template",
                "",
                "<b>Enterprise License Benefits:</b>",
                "• Unlimited document generation",
                "• White-label customization",
                "• Priority support and updates",
                "• Custom template development included",
                "• Training for your team",
                "• API access for automation",
            ],
        ),
        section(
            "Technical Specifications",
            "المواصفات الفنية",
            &[
                "<b>Output Format:</b> PDF (ISO 32000-1 compliant)",
                "<b>Languages:</b> Arabic (IBM Plex Sans Arabic), English (Inter, Helvetica)",
                "<b>Security:</b> Optional password protection, digital signatures",
                "<b>Customization:</b> Brand colors, logos, fonts, layouts",
                "<b>Integration:</b> REST API, Python SDK, CLI tool",
                "<b>Compliance:</b> HIPAA, ISO 27001, GDPR-ready",
            ],
        ),
        section(
            "Getting Started",
            "البدء",
            &[
                "<b>Step 1:</b> Choose your desired templates or package",
                "<b>Step 2:</b> Provide your branding assets (logo, colors, fonts)",
                "<b>Step 3:</b> Receive customized template library within 5 business days",
                "<b>Step 4:</b> Access via web interface, API, or Python SDK",
                "<b>Step 5:</b> Generate unlimited documents with your branding",
                "",
                "<b>Support:</b> Email support@brainsait.com or call +966 11 XXX XXXX",
                "<b>Demo:</b> Request a live demonstration at demo.brainsait.com",
            ],
        ),
    ];

    DocumentSpec { info, sections }
}
