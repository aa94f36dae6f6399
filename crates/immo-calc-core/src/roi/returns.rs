use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::mortgage::monthly_payment;
use super::projection::project_ten_years;
use super::ProjectionYear;
use crate::error::ImmoCalcError;
use crate::types::{ratio_or_zero, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Rental investment parameters. Percent fields use 4 = 4%.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiInput {
    pub purchase_price: Money,
    pub down_payment: Money,
    pub monthly_rent: Money,
    /// Running costs borne by the owner each month
    pub monthly_expenses: Money,
    pub annual_appreciation_percent: Percent,
    pub vacancy_rate_percent: Percent,
    pub mortgage_rate_percent: Percent,
    pub mortgage_term_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentGradeLabel {
    Excellent,
    Good,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl InvestmentGradeLabel {
    /// Label for a grade on the 0-10 scale.
    pub fn from_grade(grade: Decimal) -> Self {
        if grade >= dec!(8) {
            InvestmentGradeLabel::Excellent
        } else if grade >= dec!(6) {
            InvestmentGradeLabel::Good
        } else if grade >= dec!(4) {
            InvestmentGradeLabel::Moderate
        } else if grade >= dec!(2) {
            InvestmentGradeLabel::Poor
        } else {
            InvestmentGradeLabel::VeryPoor
        }
    }
}

impl std::fmt::Display for InvestmentGradeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentGradeLabel::Excellent => write!(f, "Excellent"),
            InvestmentGradeLabel::Good => write!(f, "Good"),
            InvestmentGradeLabel::Moderate => write!(f, "Moderate"),
            InvestmentGradeLabel::Poor => write!(f, "Poor"),
            InvestmentGradeLabel::VeryPoor => write!(f, "Very Poor"),
        }
    }
}

/// The five 0-10 sub-scores behind the investment grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeBreakdown {
    pub gross_yield_score: u32,
    pub cap_rate_score: u32,
    pub cash_on_cash_score: u32,
    pub cash_flow_score: u32,
    pub vacancy_score: u32,
}

/// Annual return metrics. Yields and returns are decimals (0.048 = 4.8%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub loan_amount: Money,
    pub monthly_mortgage_payment: Money,
    pub gross_rental_income: Money,
    /// Gross income after vacancy loss
    pub effective_rental_income: Money,
    pub annual_expenses: Money,
    pub net_operating_income: Money,
    /// NOI less twelve mortgage payments
    pub annual_cash_flow: Money,
    pub gross_yield: Rate,
    pub net_yield: Rate,
    pub cap_rate: Rate,
    pub cash_on_cash_return: Rate,
    /// 0-10, one decimal
    pub investment_grade: Decimal,
    pub investment_grade_label: InvestmentGradeLabel,
    pub grade_breakdown: GradeBreakdown,
    /// Years 1 through 10
    pub projected_values: Vec<ProjectionYear>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive yields, cash flow, the investment grade and the ten-year projection.
///
/// Returns `None` unless both the purchase price and the monthly rent are
/// positive, or when an intermediate amount leaves the decimal range.
pub fn calculate_roi(input: &RoiInput) -> Option<RoiResult> {
    if input.purchase_price <= Decimal::ZERO || input.monthly_rent <= Decimal::ZERO {
        tracing::debug!(calculator = "roi", "purchase price or monthly rent missing");
        return None;
    }

    // Step 1: financing
    let loan_amount = input.purchase_price.checked_sub(input.down_payment)?;
    let monthly_mortgage_payment = monthly_payment(
        loan_amount,
        input.mortgage_rate_percent,
        input.mortgage_term_years,
    )?;

    // Step 2: annual income
    let gross_rental_income = input.monthly_rent.checked_mul(dec!(12))?;
    let occupancy = Decimal::ONE.checked_sub(input.vacancy_rate_percent / dec!(100))?;
    let effective_rental_income = gross_rental_income.checked_mul(occupancy)?;
    let annual_expenses = input.monthly_expenses.checked_mul(dec!(12))?;
    let net_operating_income = effective_rental_income.checked_sub(annual_expenses)?;
    let annual_debt_service = monthly_mortgage_payment.checked_mul(dec!(12))?;
    let annual_cash_flow = net_operating_income.checked_sub(annual_debt_service)?;

    // Step 3: ratios
    let gross_yield = gross_rental_income.checked_div(input.purchase_price)?;
    let net_yield = net_operating_income.checked_div(input.purchase_price)?;
    let cap_rate = net_yield;
    let cash_on_cash_return = if input.down_payment > Decimal::ZERO {
        annual_cash_flow.checked_div(input.down_payment)?
    } else {
        Decimal::ZERO
    };

    // Step 4: grade
    let grade_breakdown = GradeBreakdown {
        gross_yield_score: gross_yield_score(gross_yield),
        cap_rate_score: cap_rate_score(cap_rate),
        cash_on_cash_score: cash_on_cash_score(cash_on_cash_return),
        cash_flow_score: cash_flow_score(annual_cash_flow),
        vacancy_score: vacancy_score(input.vacancy_rate_percent),
    };
    let investment_grade = investment_grade(&grade_breakdown);
    let investment_grade_label = InvestmentGradeLabel::from_grade(investment_grade);

    // Step 5: projection
    let projected_values = project_ten_years(
        input,
        loan_amount,
        monthly_mortgage_payment,
        annual_cash_flow,
    )?;

    Some(RoiResult {
        loan_amount,
        monthly_mortgage_payment,
        gross_rental_income,
        effective_rental_income,
        annual_expenses,
        net_operating_income,
        annual_cash_flow,
        gross_yield,
        net_yield,
        cap_rate,
        cash_on_cash_return,
        investment_grade,
        investment_grade_label,
        grade_breakdown,
        projected_values,
    })
}

/// ROI metrics wrapped with warnings and metadata.
pub fn analyse_roi(input: &RoiInput) -> CalcResult<ComputationOutput<RoiResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_roi(input).ok_or_else(|| {
        ImmoCalcError::insufficient(
            "roi",
            "purchase_price and monthly_rent must be positive and amounts within range",
        )
    })?;

    if result.annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative annual cash flow of {:.2} EUR; the investment needs monthly top-ups",
            result.annual_cash_flow
        ));
    }
    if input.vacancy_rate_percent > dec!(15) {
        warnings.push(format!(
            "Vacancy rate {}% exceeds 15%, above typical market norms",
            input.vacancy_rate_percent
        ));
    }
    if input.down_payment <= Decimal::ZERO {
        warnings.push("No down payment: cash-on-cash return reported as 0".into());
    } else if ratio_or_zero(input.down_payment, input.purchase_price)
        .is_some_and(|share| share < dec!(0.20))
    {
        warnings.push("Down payment below 20% of the price; expect higher mortgage rates".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental ROI with 10-year amortising projection",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

fn gross_yield_score(gross_yield: Rate) -> u32 {
    if gross_yield >= dec!(0.08) {
        10
    } else if gross_yield >= dec!(0.06) {
        8
    } else if gross_yield >= dec!(0.04) {
        6
    } else if gross_yield >= dec!(0.02) {
        3
    } else {
        0
    }
}

fn cap_rate_score(cap_rate: Rate) -> u32 {
    if cap_rate >= dec!(0.07) {
        10
    } else if cap_rate >= dec!(0.05) {
        7
    } else if cap_rate >= dec!(0.03) {
        4
    } else {
        0
    }
}

fn cash_on_cash_score(coc: Rate) -> u32 {
    if coc >= dec!(0.15) {
        10
    } else if coc >= dec!(0.10) {
        8
    } else if coc >= dec!(0.05) {
        6
    } else if coc >= Decimal::ZERO {
        3
    } else {
        0
    }
}

fn cash_flow_score(annual_cash_flow: Money) -> u32 {
    if annual_cash_flow > Decimal::ZERO {
        10
    } else if annual_cash_flow.is_zero() {
        5
    } else {
        0
    }
}

fn vacancy_score(vacancy_percent: Percent) -> u32 {
    if vacancy_percent < dec!(5) {
        10
    } else if vacancy_percent <= dec!(15) {
        6
    } else {
        2
    }
}

/// Weighted 0-10 grade rounded to one decimal.
fn investment_grade(b: &GradeBreakdown) -> Decimal {
    let weighted = dec!(0.25) * Decimal::from(b.gross_yield_score)
        + dec!(0.25) * Decimal::from(b.cap_rate_score)
        + dec!(0.25) * Decimal::from(b.cash_on_cash_score)
        + dec!(0.15) * Decimal::from(b.cash_flow_score)
        + dec!(0.10) * Decimal::from(b.vacancy_score);
    (weighted * dec!(10)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        / dec!(10)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
