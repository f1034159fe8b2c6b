use crate::model::DocumentInfo;

use super::{DocumentSpec, section};

pub fn employee_handbook() -> DocumentSpec {
    let info = DocumentInfo::new(
        "BrainSAIT Employee Handbook",
        "Employee Handbook",
        "Human Resources",
    )
    .localized("دليل موظفي برين سايت")
    .classification("INTERNAL USE - ALL EMPLOYEES")
    .version("3.0");

    let sections = vec![
        section(
            "Welcome to BrainSAIT",
            "مرحباً بكم في برين سايت",
            &[
                "Welcome to BrainSAIT! We are thrilled to have you join our team of healthcare \
                 technology innovators. This handbook provides essential information about our \
                 company culture, policies, and procedures.",
                "<b>Our Mission:</b> To revolutionize healthcare delivery in the Middle East \
                 through AI-powered, compliant, and user-friendly technology solutions.",
                "<b>Our Values:</b>",
                "• Innovation: Continuously pushing the boundaries of healthcare technology",
                "• Compliance: Unwavering commitment to patient privacy and regulatory standards",
                "• Excellence: Delivering exceptional quality in everything we do",
                "• Collaboration: Working together to achieve common goals",
            ],
        ),
        section(
            "Employment Policies",
            "سياسات التوظيف",
            &[
                "<b>Equal Opportunity:</b> BrainSAIT is an equal opportunity employer committed \
                 to diversity and inclusion. We do not discriminate based on race, color, \
                 religion, sex, national origin, age, disability, or any other protected \
                 characteristic.",
                "<b>Working Hours:</b> Standard working hours are Sunday-Thursday, 9:00 AM - \
                 6:00 PM. Flexible working arrangements and remote work options available with \
                 manager approval.",
                "<b>Probation Period:</b> New employees have a 90-day probationary period with \
                 monthly performance reviews. Confirmation of employment requires satisfactory \
                 performance evaluation.",
            ],
        ),
        section(
            "Compensation and Benefits",
            "التعويضات والمزايا",
            &[
                "<b>Salary:</b> Competitive market-rate compensation paid monthly. Annual salary \
                 reviews conducted in Q1 based on performance and market conditions.",
                "<b>Health Insurance:</b> Comprehensive medical, dental, and vision coverage for \
                 employees and eligible dependents. Coverage begins on the first day of \
                 employment.",
                "<b>Annual Leave:</b> 30 days paid annual leave after completion of probation. \
                 Leave accrues monthly and can be carried forward up to 15 days.",
                "<b>Professional Development:</b> Annual training budget of SAR 15,000 per \
                 employee for conferences, courses, and certifications.",
            ],
        ),
        section(
            "Code of Conduct",
            "مدونة السلوك",
            &[
                "<b>Professional Behavior:</b> All employees must maintain professional conduct, \
                 respect colleagues, and uphold BrainSAIT's reputation.",
                "<b>Confidentiality:</b> Employees must protect confidential information \
                 including patient data, trade secrets, and proprietary technology. \
                 Confidentiality obligations continue after employment ends.",
                "<b>Conflicts of Interest:</b> Employees must disclose any potential conflicts \
                 of interest and avoid situations that could compromise professional judgment.",
            ],
        ),
        section(
            "Technology and Security",
            "التقنية والأمان",
            &[
                "<b>Equipment:</b> BrainSAIT provides necessary equipment including laptop, \
                 monitors, and accessories. Equipment remains company property.",
                "<b>Data Security:</b> Employees must follow all security policies, use strong \
                 passwords, enable MFA, and report security incidents immediately.",
                "<b>HIPAA Compliance:</b> All employees handling PHI must complete HIPAA training \
                 within 30 days and annually thereafter. Violations will result in disciplinary \
                 action.",
            ],
        ),
    ];

    DocumentSpec { info, sections }
}
