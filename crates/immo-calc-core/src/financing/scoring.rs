use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::advisory::{document_checklist, improvements, strengths};
use crate::error::ImmoCalcError;
use crate::types::{ratio_or_zero, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::CalcResult;

/// Property price assumed when judging the size of a down payment.
pub const ASSUMED_PROPERTY_PRICE: Money = dec!(300000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Beamter
    CivilServant,
    Permanent,
    FixedTerm,
    SelfEmployed,
    Freelance,
    Other,
}

/// SCHUFA credit rating tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchufaRating {
    Excellent,
    Good,
    Satisfactory,
    Adequate,
    Poor,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidencyStatus {
    GermanCitizen,
    EuCitizen,
    PermanentResident,
    TemporaryResident,
    NonEu,
}

/// Borrower profile. The three enums and a positive income are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingAssessmentInput {
    pub employment_status: Option<EmploymentStatus>,
    /// Years with the current employer
    pub employment_years: Decimal,
    pub monthly_net_income: Money,
    pub monthly_debt: Money,
    pub available_down_payment: Money,
    pub schufa_rating: Option<SchufaRating>,
    pub residency_status: Option<ResidencyStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikelihoodLabel {
    High,
    Good,
    Moderate,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl LikelihoodLabel {
    pub fn from_score(total_score: Decimal) -> Self {
        if total_score >= dec!(80) {
            LikelihoodLabel::High
        } else if total_score >= dec!(60) {
            LikelihoodLabel::Good
        } else if total_score >= dec!(40) {
            LikelihoodLabel::Moderate
        } else if total_score >= dec!(20) {
            LikelihoodLabel::Low
        } else {
            LikelihoodLabel::VeryLow
        }
    }
}

impl std::fmt::Display for LikelihoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LikelihoodLabel::High => write!(f, "High"),
            LikelihoodLabel::Good => write!(f, "Good"),
            LikelihoodLabel::Moderate => write!(f, "Moderate"),
            LikelihoodLabel::Low => write!(f, "Low"),
            LikelihoodLabel::VeryLow => write!(f, "Very Low"),
        }
    }
}

/// Component scores. Maxima: 20, 20, 20, 15, 15, 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub employment_score: u32,
    pub income_ratio_score: u32,
    pub down_payment_score: u32,
    pub schufa_score: u32,
    pub residency_score: u32,
    pub tenure_score: u32,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> u32 {
        self.employment_score
            + self.income_ratio_score
            + self.down_payment_score
            + self.schufa_score
            + self.residency_score
            + self.tenure_score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingAssessmentResult {
    pub scores: ScoreBreakdown,
    /// 0-100, one decimal
    pub total_score: Decimal,
    pub likelihood_label: LikelihoodLabel,
    /// Income-multiple heuristic, not an amortisation result
    pub max_loan_estimate: Money,
    pub recommended_down_payment_percent: Percent,
    pub expected_rate_min: Percent,
    pub expected_rate_max: Percent,
    /// Loan over (down payment + loan), as a decimal
    pub ltv_ratio: Rate,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub document_checklist: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score a borrower's chances of getting a German mortgage.
///
/// Returns `None` unless employment status, SCHUFA rating and residency
/// status are all set and the monthly net income is positive, or when an
/// amount leaves the decimal range.
pub fn calculate_assessment(
    input: &FinancingAssessmentInput,
) -> Option<FinancingAssessmentResult> {
    let (employment, schufa, residency) = match (
        input.employment_status,
        input.schufa_rating,
        input.residency_status,
    ) {
        (Some(e), Some(s), Some(r)) if input.monthly_net_income > Decimal::ZERO => (e, s, r),
        _ => {
            tracing::debug!(calculator = "financing", "required borrower fields missing");
            return None;
        }
    };

    let scores = ScoreBreakdown {
        employment_score: employment_score(employment),
        income_ratio_score: income_ratio_score(input.monthly_debt, input.monthly_net_income)?,
        down_payment_score: down_payment_score(input.available_down_payment),
        schufa_score: schufa_score(schufa),
        residency_score: residency_score(residency),
        tenure_score: tenure_score(input.employment_years),
    };

    let total_score = (Decimal::from(scores.sum()) * dec!(10))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        / dec!(10);
    let likelihood_label = LikelihoodLabel::from_score(total_score);

    let disposable = input.monthly_net_income.checked_sub(input.monthly_debt)?;
    let max_loan_estimate = if disposable > Decimal::ZERO {
        disposable
            .checked_mul(dec!(100))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    let recommended_down_payment_percent = recommended_down_payment(residency, schufa);
    let (expected_rate_min, expected_rate_max) = expected_rate_band(total_score);
    let ltv_ratio = ratio_or_zero(
        max_loan_estimate,
        input.available_down_payment.checked_add(max_loan_estimate)?,
    )?;

    Some(FinancingAssessmentResult {
        scores,
        total_score,
        likelihood_label,
        max_loan_estimate,
        recommended_down_payment_percent,
        expected_rate_min,
        expected_rate_max,
        ltv_ratio,
        strengths: strengths(&scores),
        improvements: improvements(&scores),
        document_checklist: document_checklist(
            employment,
            residency,
            input.available_down_payment,
        ),
    })
}

/// Eligibility assessment wrapped with warnings and metadata.
pub fn analyse_financing(
    input: &FinancingAssessmentInput,
) -> CalcResult<ComputationOutput<FinancingAssessmentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_assessment(input).ok_or_else(|| {
        ImmoCalcError::insufficient(
            "financing",
            "employment_status, schufa_rating, residency_status and a positive \
             monthly_net_income are required, with amounts within range",
        )
    })?;

    let debt_ratio =
        ratio_or_zero(input.monthly_debt, input.monthly_net_income).unwrap_or(Decimal::MAX);
    if debt_ratio > dec!(0.45) {
        warnings.push(format!(
            "Debt service takes {:.0}% of net income; most lenders cap this near 40%",
            debt_ratio.saturating_mul(dec!(100))
        ));
    }
    if input.available_down_payment <= Decimal::ZERO {
        warnings.push("No down payment: 100% financing is rare for foreign buyers".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Weighted mortgage eligibility score (six factors)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Component scores
// ---------------------------------------------------------------------------

fn employment_score(status: EmploymentStatus) -> u32 {
    match status {
        EmploymentStatus::CivilServant => 20,
        EmploymentStatus::Permanent => 18,
        EmploymentStatus::FixedTerm => 10,
        EmploymentStatus::SelfEmployed => 8,
        EmploymentStatus::Freelance => 6,
        EmploymentStatus::Other => 5,
    }
}

fn income_ratio_score(monthly_debt: Money, monthly_income: Money) -> Option<u32> {
    if monthly_income <= Decimal::ZERO {
        return Some(0);
    }
    let ratio = monthly_debt.checked_div(monthly_income)?;
    let score = if ratio <= dec!(0.15) {
        20
    } else if ratio <= dec!(0.25) {
        16
    } else if ratio <= dec!(0.35) {
        12
    } else if ratio <= dec!(0.45) {
        6
    } else {
        2
    };
    Some(score)
}

fn down_payment_score(down_payment: Money) -> u32 {
    let share = down_payment / ASSUMED_PROPERTY_PRICE;
    if share >= dec!(0.30) {
        20
    } else if share >= dec!(0.20) {
        16
    } else if share >= dec!(0.10) {
        12
    } else if share >= dec!(0.05) {
        6
    } else {
        2
    }
}

fn schufa_score(rating: SchufaRating) -> u32 {
    match rating {
        SchufaRating::Excellent => 15,
        SchufaRating::Good => 12,
        SchufaRating::Satisfactory => 9,
        SchufaRating::Adequate => 5,
        SchufaRating::Poor => 2,
        SchufaRating::Unknown => 3,
    }
}

fn residency_score(status: ResidencyStatus) -> u32 {
    match status {
        ResidencyStatus::GermanCitizen => 15,
        ResidencyStatus::EuCitizen => 13,
        ResidencyStatus::PermanentResident => 11,
        ResidencyStatus::TemporaryResident => 6,
        ResidencyStatus::NonEu => 4,
    }
}

fn tenure_score(years: Decimal) -> u32 {
    if years >= dec!(5) {
        10
    } else if years >= dec!(3) {
        8
    } else if years >= dec!(2) {
        6
    } else if years >= dec!(1) {
        4
    } else {
        2
    }
}

// ---------------------------------------------------------------------------
// Derived estimates
// ---------------------------------------------------------------------------

fn recommended_down_payment(residency: ResidencyStatus, schufa: SchufaRating) -> Percent {
    if residency == ResidencyStatus::GermanCitizen
        && matches!(schufa, SchufaRating::Excellent | SchufaRating::Good)
    {
        return dec!(15);
    }

    let mut percent = dec!(20);
    if matches!(
        residency,
        ResidencyStatus::NonEu | ResidencyStatus::TemporaryResident
    ) {
        percent += dec!(10);
    }
    if matches!(schufa, SchufaRating::Poor | SchufaRating::Unknown) {
        percent += dec!(5);
    }
    percent.min(dec!(40))
}

/// Indicative interest band (percent p.a.) for a total score.
fn expected_rate_band(total_score: Decimal) -> (Percent, Percent) {
    if total_score >= dec!(80) {
        (dec!(3.0), dec!(3.8))
    } else if total_score >= dec!(60) {
        (dec!(3.5), dec!(4.3))
    } else if total_score >= dec!(40) {
        (dec!(4.0), dec!(4.8))
    } else if total_score >= dec!(20) {
        (dec!(4.5), dec!(5.5))
    } else {
        (dec!(5.0), dec!(6.5))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> FinancingAssessmentInput {
        FinancingAssessmentInput {
            employment_status: Some(EmploymentStatus::Permanent),
            employment_years: dec!(5),
            monthly_net_income: dec!(4000),
            monthly_debt: dec!(400),
            available_down_payment: dec!(90000),
            schufa_rating: Some(SchufaRating::Good),
            residency_status: Some(ResidencyStatus::GermanCitizen),
        }
    }

    #[test]
    fn test_strong_german_borrower() {
        let r = calculate_assessment(&sample_input()).unwrap();
        assert_eq!(
            r.scores,
            ScoreBreakdown {
                employment_score: 18,
                income_ratio_score: 20,
                down_payment_score: 20,
                schufa_score: 12,
                residency_score: 15,
                tenure_score: 10,
            }
        );
        assert_eq!(r.total_score, dec!(95.0));
        assert_eq!(r.likelihood_label, LikelihoodLabel::High);
        assert_eq!(r.max_loan_estimate, dec!(360000));
        assert_eq!(r.recommended_down_payment_percent, dec!(15));
        assert_eq!((r.expected_rate_min, r.expected_rate_max), (dec!(3.0), dec!(3.8)));
        assert_eq!(r.ltv_ratio, dec!(360000) / dec!(450000));
    }

    #[test]
    fn test_missing_enum_is_none() {
        let mut input = sample_input();
        input.schufa_rating = None;
        assert!(calculate_assessment(&input).is_none());

        let mut input = sample_input();
        input.employment_status = None;
        assert!(calculate_assessment(&input).is_none());

        let mut input = sample_input();
        input.residency_status = None;
        assert!(calculate_assessment(&input).is_none());

        let mut input = sample_input();
        input.monthly_net_income = Decimal::ZERO;
        assert!(calculate_assessment(&input).is_none());
    }

    #[test]
    fn test_out_of_range_amounts_are_none() {
        let mut input = sample_input();
        input.monthly_net_income = dec!(0.0001);
        input.monthly_debt = Decimal::MAX;
        assert!(calculate_assessment(&input).is_none());

        let mut input = sample_input();
        input.monthly_net_income = Decimal::MAX;
        input.monthly_debt = Decimal::ZERO;
        assert!(calculate_assessment(&input).is_none());
    }

    #[test]
    fn test_income_ratio_bands() {
        let income = dec!(1000);
        assert_eq!(income_ratio_score(dec!(150), income), Some(20));
        assert_eq!(income_ratio_score(dec!(250), income), Some(16));
        assert_eq!(income_ratio_score(dec!(350), income), Some(12));
        assert_eq!(income_ratio_score(dec!(450), income), Some(6));
        assert_eq!(income_ratio_score(dec!(451), income), Some(2));
        assert_eq!(income_ratio_score(dec!(100), Decimal::ZERO), Some(0));
    }

    #[test]
    fn test_down_payment_bands() {
        assert_eq!(down_payment_score(dec!(90000)), 20);
        assert_eq!(down_payment_score(dec!(60000)), 16);
        assert_eq!(down_payment_score(dec!(30000)), 12);
        assert_eq!(down_payment_score(dec!(15000)), 6);
        assert_eq!(down_payment_score(dec!(14999)), 2);
        assert_eq!(down_payment_score(Decimal::ZERO), 2);
    }

    #[test]
    fn test_tenure_bands() {
        assert_eq!(tenure_score(dec!(0.5)), 2);
        assert_eq!(tenure_score(dec!(1)), 4);
        assert_eq!(tenure_score(dec!(2.5)), 6);
        assert_eq!(tenure_score(dec!(3)), 8);
        assert_eq!(tenure_score(dec!(12)), 10);
    }

    #[test]
    fn test_recommended_down_payment_rules() {
        use ResidencyStatus::*;
        use SchufaRating as S;
        assert_eq!(recommended_down_payment(GermanCitizen, S::Excellent), dec!(15));
        assert_eq!(recommended_down_payment(GermanCitizen, S::Satisfactory), dec!(20));
        assert_eq!(recommended_down_payment(EuCitizen, S::Good), dec!(20));
        assert_eq!(recommended_down_payment(NonEu, S::Good), dec!(30));
        assert_eq!(recommended_down_payment(TemporaryResident, S::Unknown), dec!(35));
        assert_eq!(recommended_down_payment(GermanCitizen, S::Poor), dec!(25));
    }

    #[test]
    fn test_weak_profile() {
        let input = FinancingAssessmentInput {
            employment_status: Some(EmploymentStatus::Freelance),
            employment_years: dec!(0.5),
            monthly_net_income: dec!(2000),
            monthly_debt: dec!(2500),
            available_down_payment: Decimal::ZERO,
            schufa_rating: Some(SchufaRating::Poor),
            residency_status: Some(ResidencyStatus::NonEu),
        };
        let r = calculate_assessment(&input).unwrap();
        // 6 + 2 + 2 + 2 + 4 + 2 = 18
        assert_eq!(r.total_score, dec!(18));
        assert_eq!(r.likelihood_label, LikelihoodLabel::VeryLow);
        assert_eq!(r.max_loan_estimate, Decimal::ZERO);
        assert_eq!(r.ltv_ratio, Decimal::ZERO);
        assert_eq!(r.recommended_down_payment_percent, dec!(35));
        assert_eq!((r.expected_rate_min, r.expected_rate_max), (dec!(5.0), dec!(6.5)));
        assert!(r.strengths.is_empty());
        assert_eq!(r.improvements.len(), 6);

        let out = analyse_financing(&input).unwrap();
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(LikelihoodLabel::VeryLow.to_string(), "Very Low");
        assert_eq!(LikelihoodLabel::from_score(dec!(59.9)), LikelihoodLabel::Moderate);
    }
}
