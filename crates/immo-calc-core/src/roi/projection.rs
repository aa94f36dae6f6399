use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::mortgage::{amortize_months, monthly_rate};
use super::returns::{calculate_roi, RoiInput};
use crate::types::{compound, Money, Rate};

/// Years covered by the equity-tracking projection.
pub const PROJECTION_YEARS: u32 = 10;
/// Years covered by the legacy projection.
pub const SIMPLE_PROJECTION_YEARS: u32 = 5;
/// Yearly escalation applied to the first-year cash flow.
const CASH_FLOW_ESCALATION: Rate = dec!(0.02);

/// One year of the ten-year projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    pub year: u32,
    pub property_value: Money,
    /// Mortgage balance outstanding at the end of the year
    pub remaining_balance: Money,
    pub equity: Money,
    /// Cash flow for this year alone, after escalation
    pub annual_cash_flow: Money,
    pub cumulative_cash_flow: Money,
    /// Appreciation plus cumulative cash flow
    pub total_return: Money,
    /// Total return over the down payment, as a decimal
    pub total_return_percent: Rate,
}

/// One year of the legacy five-year projection. No equity is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleProjectionYear {
    pub year: u32,
    pub property_value: Money,
    pub cumulative_cash_flow: Money,
    pub total_return: Money,
}

/// Build the ten-year projection for an already-derived ROI case.
///
/// The mortgage is amortised month by month, so equity grows both from
/// appreciation and principal repayment. `None` if any year overflows.
pub(crate) fn project_ten_years(
    input: &RoiInput,
    loan_amount: Money,
    monthly_payment: Money,
    first_year_cash_flow: Money,
) -> Option<Vec<ProjectionYear>> {
    let appreciation = input.annual_appreciation_percent / dec!(100);
    let rate = monthly_rate(input.mortgage_rate_percent);

    let mut balance = loan_amount.max(Decimal::ZERO);
    let mut cumulative_cash_flow = Decimal::ZERO;
    let mut years = Vec::with_capacity(PROJECTION_YEARS as usize);

    for year in 1..=PROJECTION_YEARS {
        let property_value = input
            .purchase_price
            .checked_mul(compound(appreciation, year)?)?;
        balance = amortize_months(balance, rate, monthly_payment, 12)?;
        let equity = property_value.checked_sub(balance)?;

        let escalation = compound(CASH_FLOW_ESCALATION, year - 1)?;
        let annual_cash_flow = first_year_cash_flow.checked_mul(escalation)?;
        cumulative_cash_flow = cumulative_cash_flow.checked_add(annual_cash_flow)?;

        let total_return = property_value
            .checked_sub(input.purchase_price)?
            .checked_add(cumulative_cash_flow)?;
        let total_return_percent = if input.down_payment > Decimal::ZERO {
            total_return.checked_div(input.down_payment)?
        } else {
            Decimal::ZERO
        };

        years.push(ProjectionYear {
            year,
            property_value,
            remaining_balance: balance,
            equity,
            annual_cash_flow,
            cumulative_cash_flow,
            total_return,
            total_return_percent,
        });
    }

    Some(years)
}

/// Legacy five-year view: value growth plus a flat yearly cash flow.
///
/// Kept for callers of the earlier calculator; the canonical projection is
/// [`RoiResult::projected_values`](super::RoiResult). Gated like
/// [`calculate_roi`].
pub fn simple_projection(input: &RoiInput) -> Option<Vec<SimpleProjectionYear>> {
    let roi = calculate_roi(input)?;
    let appreciation = input.annual_appreciation_percent / dec!(100);

    let mut cumulative_cash_flow = Decimal::ZERO;
    (1..=SIMPLE_PROJECTION_YEARS)
        .map(|year| {
            let property_value = input
                .purchase_price
                .checked_mul(compound(appreciation, year)?)?;
            cumulative_cash_flow = cumulative_cash_flow.checked_add(roi.annual_cash_flow)?;
            let total_return = property_value
                .checked_sub(input.purchase_price)?
                .checked_add(cumulative_cash_flow)?;
            Some(SimpleProjectionYear {
                year,
                property_value,
                cumulative_cash_flow,
                total_return,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::calculate_roi;
    use rust_decimal_macros::dec;

    fn sample_input() -> RoiInput {
        RoiInput {
            purchase_price: dec!(300000),
            down_payment: dec!(60000),
            monthly_rent: dec!(1200),
            monthly_expenses: dec!(200),
            annual_appreciation_percent: dec!(2),
            vacancy_rate_percent: dec!(5),
            mortgage_rate_percent: dec!(4),
            mortgage_term_years: 25,
        }
    }

    #[test]
    fn test_ten_entries_in_order() {
        let r = calculate_roi(&sample_input()).unwrap();
        let years: Vec<u32> = r.projected_values.iter().map(|p| p.year).collect();
        assert_eq!(years, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn test_balance_non_increasing() {
        let r = calculate_roi(&sample_input()).unwrap();
        let mut previous = r.loan_amount;
        for p in &r.projected_values {
            assert!(p.remaining_balance <= previous);
            assert!(p.remaining_balance >= Decimal::ZERO);
            previous = p.remaining_balance;
        }
    }

    #[test]
    fn test_year_one_values() {
        let r = calculate_roi(&sample_input()).unwrap();
        let y1 = &r.projected_values[0];
        assert_eq!(y1.property_value, dec!(306000));
        assert_eq!(y1.annual_cash_flow, r.annual_cash_flow);
        assert_eq!(y1.cumulative_cash_flow, r.annual_cash_flow);
        assert_eq!(y1.equity, y1.property_value - y1.remaining_balance);
        assert_eq!(y1.total_return, dec!(6000) + r.annual_cash_flow);
        assert_eq!(y1.total_return_percent, y1.total_return / dec!(60000));
    }

    #[test]
    fn test_cash_flow_escalates_two_percent() {
        let r = calculate_roi(&sample_input()).unwrap();
        let y1 = r.projected_values[0].annual_cash_flow;
        let y2 = r.projected_values[1].annual_cash_flow;
        assert_eq!(y2, y1 * dec!(1.02));
        let sum: Decimal = r.projected_values.iter().map(|p| p.annual_cash_flow).sum();
        assert_eq!(r.projected_values[9].cumulative_cash_flow, sum);
    }

    #[test]
    fn test_short_loan_fully_repaid() {
        let mut input = sample_input();
        input.mortgage_term_years = 5;
        let r = calculate_roi(&input).unwrap();
        let y10 = &r.projected_values[9];
        assert!(y10.remaining_balance < dec!(0.01));
        assert!((y10.equity - y10.property_value).abs() < dec!(0.01));
    }

    #[test]
    fn test_no_down_payment_total_return_percent_zero() {
        let mut input = sample_input();
        input.down_payment = Decimal::ZERO;
        let r = calculate_roi(&input).unwrap();
        assert!(r.projected_values.iter().all(|p| p.total_return_percent.is_zero()));
    }

    #[test]
    fn test_simple_projection_is_separate() {
        let input = sample_input();
        let roi = calculate_roi(&input).unwrap();
        let simple = simple_projection(&input).unwrap();
        assert_eq!(simple.len(), 5);
        assert_eq!(simple[4].cumulative_cash_flow, roi.annual_cash_flow * dec!(5));
        assert_eq!(simple[0].property_value, roi.projected_values[0].property_value);
    }

    #[test]
    fn test_runaway_appreciation_is_none() {
        let mut input = sample_input();
        input.annual_appreciation_percent = dec!(1000000000000000);
        assert!(calculate_roi(&input).is_none());
        assert!(simple_projection(&input).is_none());
    }

    #[test]
    fn test_simple_projection_gated() {
        assert!(simple_projection(&RoiInput::default()).is_none());
    }
}
