//! Narrative output for the eligibility assessment.
//!
//! The order of entries is fixed: one line per component score, in the order
//! employment, income ratio, down payment, SCHUFA, residency, tenure.

use rust_decimal::Decimal;

use super::scoring::{EmploymentStatus, ResidencyStatus, ScoreBreakdown};
use crate::types::Money;

const BASE_DOCUMENTS: [&str; 6] = [
    "Valid passport or national ID card",
    "Payslips for the last three months",
    "Employment contract",
    "Income tax assessments (Steuerbescheide) for the last two years",
    "SCHUFA self-disclosure (SCHUFA-Auskunft)",
    "Bank statements for the last three months",
];

const SELF_EMPLOYED_DOCUMENTS: [&str; 3] = [
    "Business evaluations (BWA) for the last two years",
    "Annual financial statements or profit and loss accounts for the last three years",
    "Income tax returns for the last three years",
];

const NON_EU_DOCUMENTS: [&str; 3] = [
    "Residence permit (Aufenthaltstitel)",
    "Work permit or employment authorisation",
    "Registration certificate (Meldebescheinigung)",
];

const EU_DOCUMENTS: [&str; 1] = ["EU registration certificate (Anmeldebescheinigung)"];

const DOWN_PAYMENT_DOCUMENTS: [&str; 2] = [
    "Proof of equity (savings or securities statements)",
    "Evidence of the source of funds for the down payment",
];

/// Components scoring well enough to count in the borrower's favour.
pub fn strengths(scores: &ScoreBreakdown) -> Vec<String> {
    let mut out = Vec::new();
    if scores.employment_score >= 16 {
        out.push("Stable employment that German lenders rate highly".to_string());
    }
    if scores.income_ratio_score >= 16 {
        out.push("Low debt-to-income ratio leaves room for mortgage payments".to_string());
    }
    if scores.down_payment_score >= 16 {
        out.push("Substantial down payment of 20% or more".to_string());
    }
    if scores.schufa_score >= 12 {
        out.push("Good SCHUFA credit rating".to_string());
    }
    if scores.residency_score >= 13 {
        out.push("German or EU residency simplifies the lending process".to_string());
    }
    if scores.tenure_score >= 8 {
        out.push("Three or more years with the current employer".to_string());
    }
    out
}

/// Components that are holding the score back, with a suggested fix.
pub fn improvements(scores: &ScoreBreakdown) -> Vec<String> {
    let mut out = Vec::new();
    if scores.employment_score < 12 {
        out.push(
            "Lenders prefer permanent contracts; self-employed applicants need at least \
             two years of accounts"
                .to_string(),
        );
    }
    if scores.income_ratio_score < 12 {
        out.push(
            "Pay down existing loans to bring monthly debt below 35% of net income".to_string(),
        );
    }
    if scores.down_payment_score < 12 {
        out.push(
            "Save towards a down payment of at least 10%, ideally 20% plus side costs".to_string(),
        );
    }
    if scores.schufa_score < 9 {
        out.push(
            "Request your free SCHUFA data copy, correct errors and avoid new credit applications"
                .to_string(),
        );
    }
    if scores.residency_score < 11 {
        out.push(
            "A permanent residence permit or a German co-borrower widens the choice of lenders"
                .to_string(),
        );
    }
    if scores.tenure_score < 6 {
        out.push("Most banks expect at least two years with the current employer".to_string());
    }
    out
}

/// Paperwork a bank will ask for, given the borrower's situation.
pub fn document_checklist(
    employment: EmploymentStatus,
    residency: ResidencyStatus,
    down_payment: Money,
) -> Vec<String> {
    let mut docs: Vec<&str> = BASE_DOCUMENTS.to_vec();

    if matches!(
        employment,
        EmploymentStatus::SelfEmployed | EmploymentStatus::Freelance
    ) {
        docs.extend(SELF_EMPLOYED_DOCUMENTS);
    }
    if matches!(
        residency,
        ResidencyStatus::TemporaryResident | ResidencyStatus::NonEu
    ) {
        docs.extend(NON_EU_DOCUMENTS);
    }
    if residency == ResidencyStatus::EuCitizen {
        docs.extend(EU_DOCUMENTS);
    }
    if down_payment > Decimal::ZERO {
        docs.extend(DOWN_PAYMENT_DOCUMENTS);
    }

    docs.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn top_scores() -> ScoreBreakdown {
        ScoreBreakdown {
            employment_score: 20,
            income_ratio_score: 20,
            down_payment_score: 20,
            schufa_score: 15,
            residency_score: 15,
            tenure_score: 10,
        }
    }

    #[test]
    fn test_top_scores_only_strengths() {
        assert_eq!(strengths(&top_scores()).len(), 6);
        assert!(improvements(&top_scores()).is_empty());
    }

    #[test]
    fn test_middle_band_is_neither() {
        let scores = ScoreBreakdown {
            employment_score: 12,
            income_ratio_score: 12,
            down_payment_score: 12,
            schufa_score: 9,
            residency_score: 11,
            tenure_score: 6,
        };
        assert!(strengths(&scores).is_empty());
        assert!(improvements(&scores).is_empty());
    }

    #[test]
    fn test_strength_order_follows_components() {
        let mut scores = top_scores();
        scores.income_ratio_score = 2;
        let s = strengths(&scores);
        assert_eq!(s.len(), 5);
        assert!(s[0].contains("employment"));
        assert!(s[1].contains("down payment"));
    }

    #[test]
    fn test_base_checklist() {
        let docs = document_checklist(
            EmploymentStatus::Permanent,
            ResidencyStatus::GermanCitizen,
            Decimal::ZERO,
        );
        assert_eq!(docs.len(), 6);
        assert_eq!(docs[0], BASE_DOCUMENTS[0]);
    }

    #[test]
    fn test_checklist_groups_in_order() {
        let docs = document_checklist(
            EmploymentStatus::SelfEmployed,
            ResidencyStatus::NonEu,
            dec!(50000),
        );
        assert_eq!(docs.len(), 6 + 3 + 3 + 2);
        assert_eq!(docs[6], SELF_EMPLOYED_DOCUMENTS[0]);
        assert_eq!(docs[9], NON_EU_DOCUMENTS[0]);
        assert_eq!(docs[12], DOWN_PAYMENT_DOCUMENTS[0]);
    }

    #[test]
    fn test_eu_citizen_gets_registration_certificate() {
        let docs = document_checklist(
            EmploymentStatus::Freelance,
            ResidencyStatus::EuCitizen,
            Decimal::ZERO,
        );
        assert_eq!(docs.len(), 6 + 3 + 1);
        assert_eq!(docs.last().map(String::as_str), Some(EU_DOCUMENTS[0]));
    }
}
