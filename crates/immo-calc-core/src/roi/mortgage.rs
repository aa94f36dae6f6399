use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{compound, Money, Percent, Rate};

/// Level monthly payment on an amortising loan: P * r(1+r)^n / ((1+r)^n - 1).
///
/// `r` is the annual rate / 100 / 12 and `n` the term in months. Returns zero
/// when the principal, the rate or the term is not positive. Once `(1+r)^n`
/// leaves the decimal range the payment is the interest-only limit `P * r`.
/// `None` only when `P * r` itself overflows.
pub fn monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> Option<Money> {
    if principal <= Decimal::ZERO || annual_rate_percent <= Decimal::ZERO || term_years == 0 {
        return Some(Decimal::ZERO);
    }

    let monthly_rate = monthly_rate(annual_rate_percent);
    let interest_only = principal.checked_mul(monthly_rate)?;
    let Some(factor) = compound(monthly_rate, term_years.saturating_mul(12)) else {
        tracing::debug!(term_years, "growth factor out of range, using interest-only payment");
        return Some(interest_only);
    };

    // r(1+r)^n / ((1+r)^n - 1) == r / (1 - (1+r)^-n)
    let denominator = Decimal::ONE - Decimal::ONE.checked_div(factor)?;
    if denominator.is_zero() {
        return Some(Decimal::ZERO);
    }
    interest_only.checked_div(denominator)
}

/// Annual percentage rate converted to a monthly decimal rate.
pub(crate) fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Pay a balance down for `months` instalments and return what remains.
///
/// Each month accrues `balance * monthly_rate` interest and applies the rest
/// of the payment to principal. The balance never drops below zero, and a
/// zero payment (no financing) leaves it untouched. `None` on overflow.
pub fn amortize_months(
    balance: Money,
    monthly_rate: Rate,
    payment: Money,
    months: u32,
) -> Option<Money> {
    let mut balance = balance.max(Decimal::ZERO);
    for _ in 0..months {
        if balance.is_zero() || payment.is_zero() {
            break;
        }
        let interest = balance.checked_mul(monthly_rate)?;
        let principal = payment.checked_sub(interest)?;
        balance = balance.checked_sub(principal)?.max(Decimal::ZERO);
    }
    Some(balance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_payment_sanity() {
        // 240k over 25 years at 4%: ~1,266.81
        let pmt = monthly_payment(dec!(240000), dec!(4), 25).unwrap();
        assert!((pmt - dec!(1266.8084)).abs() < dec!(0.001), "payment {pmt}");
    }

    #[test]
    fn test_zero_inputs_give_zero_payment() {
        assert_eq!(monthly_payment(Decimal::ZERO, dec!(4), 25), Some(Decimal::ZERO));
        assert_eq!(monthly_payment(dec!(100000), Decimal::ZERO, 25), Some(Decimal::ZERO));
        assert_eq!(monthly_payment(dec!(100000), dec!(4), 0), Some(Decimal::ZERO));
        assert_eq!(monthly_payment(dec!(-5), dec!(4), 10), Some(Decimal::ZERO));
    }

    #[test]
    fn test_very_long_term_pays_interest_only() {
        // 240k at 4% is 800 interest a month; 2000 years never repays any principal
        let pmt = monthly_payment(dec!(240000), dec!(4), 2000).unwrap();
        assert!((pmt - dec!(800)).abs() < dec!(0.000001), "payment {pmt}");
        let left = amortize_months(dec!(240000), monthly_rate(dec!(4)), pmt, 120).unwrap();
        assert_eq!(left, dec!(240000));
    }

    #[test]
    fn test_payment_approaches_interest_only_limit() {
        // (1+r)^n is large but still representable at 150 years
        let pmt = monthly_payment(dec!(240000), dec!(4), 150).unwrap();
        assert!(pmt > dec!(800));
        assert!(pmt - dec!(800) < dec!(3), "payment {pmt}");
    }

    #[test]
    fn test_max_term_does_not_overflow_months() {
        let pmt = monthly_payment(dec!(240000), dec!(4), u32::MAX).unwrap();
        assert!((pmt - dec!(800)).abs() < dec!(0.000001), "payment {pmt}");
    }

    #[test]
    fn test_interest_only_overflow_is_none() {
        assert_eq!(monthly_payment(Decimal::MAX, dec!(2400), 30), None);
    }

    #[test]
    fn test_full_term_repays_loan() {
        let pmt = monthly_payment(dec!(100000), dec!(5), 10).unwrap();
        let left = amortize_months(dec!(100000), monthly_rate(dec!(5)), pmt, 120).unwrap();
        assert!(left < dec!(0.01), "left {left}");
    }

    #[test]
    fn test_balance_floored_at_zero() {
        let left = amortize_months(dec!(1000), monthly_rate(dec!(3)), dec!(600), 12);
        assert_eq!(left, Some(Decimal::ZERO));
    }

    #[test]
    fn test_zero_payment_leaves_balance() {
        let left = amortize_months(dec!(5000), monthly_rate(dec!(4)), Decimal::ZERO, 12);
        assert_eq!(left, Some(dec!(5000)));
    }
}
