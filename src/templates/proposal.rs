use crate::model::DocumentInfo;

use super::{DocumentSpec, section, table};

/// Client-facing platform proposal with an implementation timeline.
pub fn business_proposal(department: &str, client: &str) -> DocumentSpec {
    let info = DocumentInfo::new(
        format!("BrainSAIT Healthcare AI Platform - Proposal for {client}"),
        "Business Proposal",
        department,
    )
    .localized(format!(
        "منصة برين سايت للذكاء الاصطناعي الصحي - مقترح لـ {client}"
    ))
    .classification("CONFIDENTIAL - RECIPIENT ONLY");

    let intro = format!(
        "BrainSAIT is pleased to present this comprehensive proposal for implementing our \
         Healthcare AI Platform at {client}. Our solution delivers NPHIES-compliant, bilingual \
         healthcare technology with proven ROI and exceptional user experience."
    );

    let sections = vec![
        section(
            "Introduction",
            "المقدمة",
            &[
                intro.as_str(),
                "<b>Our Expertise:</b> Over 5 years of healthcare technology development, \
                 registered OID (1.3.6.1.4.1.61026), HIPAA compliance, and deep understanding of \
                 Saudi healthcare regulations.",
            ],
        ),
        section(
            "Proposed Solution",
            "الحل المقترح",
            &[
                "<b>Core Platform Components:</b>",
                "• DocuLINC Lite: Intelligent document processing with OCR and AI classification",
                "• ClaimLINC Monitor: Real-time claims tracking and NPHIES integration",
                "• Voice2Care Studio: Voice-enabled clinical documentation",
                "• HealthBot Arabic: Bilingual patient engagement chatbot",
                "• Compliance Dashboard: Real-time audit and compliance monitoring",
            ],
        ),
        section(
            "Technical Specifications",
            "المواصفات الفنية",
            &[
                "<b>Architecture:</b> Cloud-native, microservices-based, with 99.9% uptime SLA",
                "<b>Security:</b> End-to-end encryption, role-based access, comprehensive audit logs",
                "<b>Integration:</b> RESTful APIs, FHIR R4 support, HL7 compatibility, NPHIES-native",
                "<b>Scalability:</b> Handles 1000+ concurrent users, 50K+ transactions per day",
                "<b>Languages:</b> Full Arabic and English support with RTL/LTR layouts",
            ],
        ),
        section(
            "Implementation Timeline",
            "الجدول الزمني للتنفيذ",
            &["We propose a phased implementation approach to minimize disruption and ensure \
               smooth adoption."],
        )
        .table(table(
            &["Phase", "Duration", "Deliverables", "Milestone"],
            &[
                &["1. Discovery", "2 weeks", "Requirements analysis, integration planning", "Signed SOW"],
                &["2. Setup", "3 weeks", "Infrastructure setup, initial configuration", "Environment ready"],
                &["3. Integration", "4 weeks", "NPHIES integration, data migration", "Systems connected"],
                &["4. Training", "2 weeks", "User training, documentation", "Staff certified"],
                &["5. Go-Live", "1 week", "Production deployment, monitoring", "System operational"],
            ],
            &[1.2, 1.2, 2.5, 1.5],
        )),
        section(
            "Investment & ROI",
            "الاستثمار والعائد",
            &[
                "<b>Implementation Investment:</b> SAR 450,000 (one-time)",
                "<b>Monthly Subscription:</b> SAR 35,000 (includes support, updates, hosting)",
                "<b>Expected ROI:</b> 6-8 months through:",
                "• 40% reduction in claims processing time",
                "• 25% decrease in claim rejection rates",
                "• 50% improvement in documentation efficiency",
                "• 30% reduction in compliance audit preparation time",
            ],
        ),
        section(
            "Support & Maintenance",
            "الدعم والصيانة",
            &[
                "<b>24/7 Technical Support:</b> Bilingual support team with <2 hour response time",
                "<b>Regular Updates:</b> Monthly feature releases and security patches",
                "<b>Training Programs:</b> Quarterly refresher training and new feature workshops",
                "<b>Compliance Monitoring:</b> Continuous compliance checks and annual audits",
            ],
        ),
    ];

    DocumentSpec { info, sections }
}
