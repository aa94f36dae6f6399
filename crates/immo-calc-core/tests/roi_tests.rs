use immo_calc_core::roi::{calculate_roi, monthly_payment, simple_projection, RoiInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// ROI calculator
// ===========================================================================

fn scenario() -> RoiInput {
    RoiInput {
        purchase_price: dec!(300000),
        down_payment: dec!(60000),
        monthly_rent: dec!(1200),
        monthly_expenses: dec!(200),
        annual_appreciation_percent: dec!(3),
        vacancy_rate_percent: dec!(5),
        mortgage_rate_percent: dec!(4),
        mortgage_term_years: 25,
    }
}

/// Closed-form annuity payment computed independently of the crate.
fn reference_payment(principal: Decimal, annual_percent: Decimal, years: u32) -> Decimal {
    let r = annual_percent / dec!(100) / dec!(12);
    let mut growth = Decimal::ONE;
    for _ in 0..years * 12 {
        growth *= Decimal::ONE + r;
    }
    principal * r * growth / (growth - Decimal::ONE)
}

#[test]
fn test_roi_scenario() {
    let r = calculate_roi(&scenario()).unwrap();
    assert_eq!(r.gross_rental_income, dec!(14400));
    assert_eq!(r.gross_yield, dec!(0.048));
    assert_eq!(r.loan_amount, dec!(240000));

    let expected = reference_payment(dec!(240000), dec!(4), 25);
    let relative = ((r.monthly_mortgage_payment - expected) / expected).abs();
    assert!(relative < dec!(0.000001), "relative error {relative}");
    assert!((r.monthly_mortgage_payment - dec!(1266.81)).abs() < dec!(0.01));
}

#[test]
fn test_gating() {
    let mut input = scenario();
    input.purchase_price = Decimal::ZERO;
    assert!(calculate_roi(&input).is_none());

    let mut input = scenario();
    input.monthly_rent = dec!(-1);
    assert!(calculate_roi(&input).is_none());
}

#[test]
fn test_balance_monotonic_for_various_loans() {
    for (rate, term) in [(dec!(1.5), 10u32), (dec!(4), 25), (dec!(7.25), 30), (dec!(3), 8)] {
        let mut input = scenario();
        input.mortgage_rate_percent = rate;
        input.mortgage_term_years = term;
        let r = calculate_roi(&input).unwrap();

        let mut previous = r.loan_amount;
        for year in &r.projected_values {
            assert!(year.remaining_balance <= previous, "rate {rate} term {term}");
            assert!(year.remaining_balance >= Decimal::ZERO);
            previous = year.remaining_balance;
        }
    }
}

#[test]
fn test_equity_grows_with_appreciation_and_repayment() {
    let r = calculate_roi(&scenario()).unwrap();
    let equities: Vec<Decimal> = r.projected_values.iter().map(|p| p.equity).collect();
    assert!(equities.windows(2).all(|w| w[0] < w[1]));
    assert!(equities[0] > dec!(60000));
}

#[test]
fn test_payment_helper_matches_result() {
    let r = calculate_roi(&scenario()).unwrap();
    assert_eq!(
        Some(r.monthly_mortgage_payment),
        monthly_payment(dec!(240000), dec!(4), 25)
    );
}

#[test]
fn test_very_long_term_falls_back_to_interest_only() {
    let mut input = scenario();
    input.mortgage_term_years = 2000;
    let r = calculate_roi(&input).unwrap();

    // 240,000 at 4% a year accrues 800 interest a month
    assert!((r.monthly_mortgage_payment - dec!(800)).abs() < dec!(0.000001));
    assert_eq!(r.projected_values.len(), 10);
    assert!(r
        .projected_values
        .iter()
        .all(|year| year.remaining_balance == r.loan_amount));
    assert!(r.annual_cash_flow > Decimal::ZERO);
}

#[test]
fn test_out_of_range_amounts_give_none() {
    let mut input = scenario();
    input.purchase_price = Decimal::MAX;
    input.down_payment = Decimal::ZERO;
    input.mortgage_rate_percent = dec!(2400);
    assert!(calculate_roi(&input).is_none());

    let mut input = scenario();
    input.monthly_rent = Decimal::MAX;
    assert!(calculate_roi(&input).is_none());
    assert!(simple_projection(&input).is_none());
}

#[test]
fn test_grade_bounds() {
    for rent in [dec!(300), dec!(1200), dec!(2500), dec!(5000)] {
        for vacancy in [dec!(0), dec!(10), dec!(30)] {
            let mut input = scenario();
            input.monthly_rent = rent;
            input.vacancy_rate_percent = vacancy;
            let r = calculate_roi(&input).unwrap();
            assert!(r.investment_grade >= Decimal::ZERO && r.investment_grade <= dec!(10));
        }
    }
}

#[test]
fn test_legacy_projection_not_conflated() {
    let input = scenario();
    let canonical = calculate_roi(&input).unwrap();
    let legacy = simple_projection(&input).unwrap();

    assert_eq!(canonical.projected_values.len(), 10);
    assert_eq!(legacy.len(), 5);
    let value = serde_json::to_value(&legacy[0]).unwrap();
    assert!(value.get("equity").is_none());
}

#[test]
fn test_idempotent() {
    assert_eq!(calculate_roi(&scenario()), calculate_roi(&scenario()));
}
