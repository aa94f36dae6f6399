//! Shared numeric helpers for form input and display.
//!
//! Parsing is total: malformed input becomes zero, so calculators can always
//! be attempted once their gating fields are present. Formatting follows the
//! German locale (`.` groups thousands, `,` separates decimals) and is purely
//! functional; no formatter state is kept between calls.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Non-breaking space used between an amount and its unit, as in de-DE output.
const UNIT_SEPARATOR: char = '\u{a0}';

/// How a free-text field should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// Whole numbers only: every non-digit character is dropped.
    Integer,
    /// Digits plus a decimal point: every other character is dropped.
    Decimal,
}

/// Parse user-entered text into a non-negative number.
///
/// Returns zero for empty or unparseable text. For [`NumberStyle::Decimal`]
/// everything after a second decimal point is ignored, so `"1.2.3"` reads as
/// `1.2`.
pub fn parse_number(text: &str, style: NumberStyle) -> Decimal {
    let cleaned: String = match style {
        NumberStyle::Integer => text.chars().filter(|c| c.is_ascii_digit()).collect(),
        NumberStyle::Decimal => {
            let kept: String = text
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            leading_decimal(&kept)
        }
    };

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Longest prefix of `digits_and_dots` that reads as a single decimal number.
fn leading_decimal(digits_and_dots: &str) -> String {
    let mut out = String::with_capacity(digits_and_dots.len() + 1);
    let mut seen_dot = false;
    for c in digits_and_dots.chars() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        out.push(c);
    }

    if out.ends_with('.') {
        out.pop();
    }
    if out.starts_with('.') {
        out.insert(0, '0');
    }
    out
}

/// Group a number the German way: `1234567.891` with 2 digits → `1.234.567,89`.
pub fn format_grouped(value: Decimal, fraction_digits: u32) -> String {
    let rounded =
        value.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.*}", fraction_digits as usize, rounded.abs());

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// EUR amount, e.g. `400.000 €`.
pub fn format_currency(value: Decimal, fraction_digits: u32) -> String {
    format!("{}{UNIT_SEPARATOR}€", format_grouped(value, fraction_digits))
}

/// Percentage value (already ×100), e.g. `3,5 %`.
pub fn format_percent(value: Decimal, fraction_digits: u32) -> String {
    format!("{}{UNIT_SEPARATOR}%", format_grouped(value, fraction_digits))
}
