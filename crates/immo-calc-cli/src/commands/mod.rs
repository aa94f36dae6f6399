pub mod evaluation;
pub mod financing;
pub mod hidden_costs;
pub mod numeric;
pub mod roi;
pub mod saved;

use immo_calc_core::numeric::{parse_number, NumberStyle};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Parse a flag value into one of the core's snake_case enums.
///
/// Accepts `civil-servant` as well as `civil_servant`.
pub(crate) fn parse_choice<T: DeserializeOwned>(
    flag: &str,
    value: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let normalised = value.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalised))
        .map_err(|_| format!("--{}: unrecognised value '{}'", flag, value).into())
}

/// Whole-euro amounts as typed by a German user: `400.000` and `400000` agree.
pub(crate) fn amount(value: Option<&str>) -> Decimal {
    value
        .map(|v| parse_number(v, NumberStyle::Integer))
        .unwrap_or(Decimal::ZERO)
}

/// Monthly amounts with cents: `850.50`, `850,50` and `1.250,50`.
///
/// A comma marks German notation, where dots only group thousands. Without a
/// comma the first dot is the decimal point.
pub(crate) fn monthly_amount(value: Option<&str>) -> Decimal {
    value
        .map(|v| {
            if v.contains(',') {
                let english = v.replace('.', "").replace(',', ".");
                parse_number(&english, NumberStyle::Decimal)
            } else {
                parse_number(v, NumberStyle::Decimal)
            }
        })
        .unwrap_or(Decimal::ZERO)
}
