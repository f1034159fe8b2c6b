use crate::model::DocumentInfo;

use super::{DocumentSpec, section};

/// Quarterly campaign plan for the marketing department.
pub fn marketing_plan(campaign: &str) -> DocumentSpec {
    let info = DocumentInfo::new(
        format!("BrainSAIT Marketing Plan: {campaign}"),
        "Marketing Plan",
        "Marketing",
    )
    .localized(format!("خطة التسويق برين سايت: {campaign}"))
    .classification("CONFIDENTIAL - MARKETING TEAM");

    let name_line = format!("<b>Campaign Name:</b> {campaign}");

    let sections = vec![
        section(
            "Campaign Overview",
            "نظرة عامة على الحملة",
            &[
                name_line.as_str(),
                "<b>Duration:</b> January 1 - March 31, 2025",
                "<b>Budget:</b> SAR 750,000",
                "<b>Primary Objective:</b> Generate 150 qualified leads and close 15 new clients",
                "<b>Target Audience:</b> Healthcare providers, insurance companies, government \
                 health organizations in Saudi Arabia",
            ],
        ),
        section(
            "Marketing Strategy",
            "الاستراتيجية التسويقية",
            &[
                "<b>Digital Marketing (40% of budget):</b>",
                "• LinkedIn advertising targeting healthcare executives",
                "• Google Search ads for NPHIES-related keywords",
                "• Content marketing: weekly blog posts, case studies, whitepapers",
                "• Email campaigns to qualified prospects",
                "<b>Events and Partnerships (35% of budget):</b>",
                "• Sponsor Saudi Health Conference 2025",
                "• Host 3 webinars on NPHIES compliance",
                "• Partner with healthcare associations",
                "<b>Direct Sales (25% of budget):</b>",
                "• Targeted account-based marketing for top 50 prospects",
                "• In-person product demonstrations",
                "• Custom proposals for enterprise clients",
            ],
        ),
        section(
            "Success Metrics",
            "مقاييس النجاح",
            &[
                "<b>Lead Generation:</b> 150 qualified leads (MQL)",
                "<b>Conversion Rate:</b> 10% MQL to customer",
                "<b>Customer Acquisition Cost:</b> SAR 50,000 per client",
                "<b>Pipeline Value:</b> SAR 5M+ in opportunities",
                "<b>Brand Awareness:</b> 50% increase in website traffic",
            ],
        ),
    ];

    DocumentSpec { info, sections }
}
