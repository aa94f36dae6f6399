use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amounts in EUR.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Values expressed as percentages (3.5 = 3.5%). Divide by 100 before use.
pub type Percent = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// `numerator / denominator`, or zero when the denominator is zero.
///
/// `None` when the quotient leaves the decimal range.
pub(crate) fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        Some(Decimal::ZERO)
    } else {
        numerator.checked_div(denominator)
    }
}

/// `percent` per cent of `amount`, `None` on overflow.
pub(crate) fn percent_of(amount: Money, percent: Percent) -> Option<Money> {
    amount.checked_mul(percent / Decimal::ONE_HUNDRED)
}

/// Sum of `values`, `None` on overflow.
pub(crate) fn checked_sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |total, value| total.checked_add(*value))
}

/// `(1 + rate)^periods` by repeated squaring, `None` on overflow.
///
/// The largest intermediate power is at most `periods`, so `None` means the
/// result itself is out of range.
pub(crate) fn compound(rate: Rate, periods: u32) -> Option<Decimal> {
    let mut base = Decimal::ONE.checked_add(rate)?;
    let mut factor = Decimal::ONE;
    let mut remaining = periods;
    while remaining > 0 {
        if remaining & 1 == 1 {
            factor = factor.checked_mul(base)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(factor)
}
