use chrono::Duration;

use crate::model::DocumentInfo;

use super::{DocumentSpec, section};

/// A named company policy owned by `department`. Effective today, reviewed in a year.
pub fn company_policy(department: &str, policy_name: &str) -> DocumentSpec {
    let info = DocumentInfo::new(format!("BrainSAIT {policy_name}"), "Company Policy", department)
        .localized(format!("سياسة برين سايت - {policy_name}"))
        .classification("INTERNAL USE - MANDATORY COMPLIANCE")
        .version("2.1");

    let effective = info.generated_at.format("%B %d, %Y").to_string();
    let review = (info.generated_at + Duration::days(365))
        .format("%B %d, %Y")
        .to_string();
    let effective_line = format!("<b>Effective Date:</b> {effective}");
    let review_line = format!("<b>Next Review Date:</b> {review}");
    let owner_line = format!("<b>Policy Owner:</b> {department} Department");

    let sections = vec![
        section(
            "Policy Information",
            "معلومات السياسة",
            &[
                effective_line.as_str(),
                review_line.as_str(),
                owner_line.as_str(),
                "<b>Approved By:</b> BrainSAIT Executive Committee",
                "<b>Compliance Framework:</b> HIPAA, NPHIES, ISO 27001",
            ],
        ),
        section(
            "1. Purpose and Scope",
            "1. الغرض والنطاق",
            &[
                "<b>Purpose:</b> This policy establishes the standards and requirements for \
                 information security across all BrainSAIT operations, systems, and data assets. \
                 It ensures compliance with healthcare regulations and protects patient health \
                 information (PHI) and personally identifiable information (PII).",
                "<b>Scope:</b> This policy applies to all BrainSAIT employees, contractors, \
                 partners, and third-party vendors who have access to company systems, data, or \
                 facilities. It covers all information assets regardless of form or location.",
            ],
        ),
        section(
            "2. Policy Statements",
            "2. بيانات السياسة",
            &[
                "<b>2.1 Data Classification:</b> All data must be classified according to \
                 sensitivity levels: Public, Internal, Confidential, and Restricted (PHI/PII).",
                "<b>2.2 Access Control:</b> Access to systems and data shall be granted based on \
                 the principle of least privilege and role-based access control (RBAC). All \
                 access requests must be approved by department managers and logged.",
                "<b>2.3 Encryption:</b> All PHI and PII must be encrypted at rest using AES-256 \
                 and in transit using TLS 1.3. Encryption keys must be managed using approved \
                 key management systems.",
                "<b>2.4 Audit Logging:</b> All system access, data modifications, and security \
                 events must be logged with comprehensive audit trails retained for minimum 7 \
                 years. Logs must be regularly reviewed for anomalies.",
                "<b>2.5 Incident Response:</b> Security incidents must be reported within 1 hour \
                 of discovery. The incident response team will investigate and remediate \
                 according to established procedures.",
            ],
        ),
        section(
            "3. Roles and Responsibilities",
            "3. الأدوار والمسؤوليات",
            &[
                "<b>Executive Management:</b> Approve policy, allocate resources, enforce compliance",
                "<b>Department Managers:</b> Implement policy in departments, approve access requests",
                "<b>IT Security Team:</b> Monitor compliance, conduct audits, manage security tools",
                "<b>All Employees:</b> Comply with policy, report incidents, complete training",
            ],
        ),
        section(
            "4. Compliance and Enforcement",
            "4. الامتثال والتطبيق",
            &[
                "<b>Compliance Monitoring:</b> Quarterly audits will be conducted to ensure \
                 policy compliance. Non-compliance will be documented and remediation plans \
                 required.",
                "<b>Training Requirements:</b> All personnel must complete annual security \
                 awareness training. New hires must complete training within 30 days.",
                "<b>Violations:</b> Policy violations may result in disciplinary action up to \
                 and including termination. Serious violations will be reported to regulatory \
                 authorities as required by law.",
            ],
        ),
        section(
            "5. Related Documents",
            "5. الوثائق ذات الصلة",
            &[
                "• Acceptable Use Policy",
                "• Data Protection Policy",
                "• Incident Response Procedure",
                "• Access Control Procedure",
                "• HIPAA Compliance Manual",
                "• Business Continuity Plan",
            ],
        ),
    ];

    DocumentSpec { info, sections }
}
