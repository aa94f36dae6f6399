use serde_json::Value;
use std::str::FromStr;

use immo_calc_core::numeric::format_currency;
use rust_decimal::Decimal;

enum Unit {
    Euro,
    Plain,
}

/// Headline figure per command, in priority order.
const HEADLINES: [(&str, Unit); 8] = [
    ("total_cost_of_ownership", Unit::Euro),
    ("investment_grade", Unit::Plain),
    ("total_score", Unit::Plain),
    ("cashflow_after_tax", Unit::Euro),
    ("total_cost", Unit::Euro),
    ("total_return", Unit::Euro),
    ("value", Unit::Plain),
    ("id", Unit::Plain),
];

/// Print only the headline figure, formatted for a German reader.
///
/// Record lists print one line per row. Anything else falls back to the
/// first field of the result.
pub fn print_minimal(value: &Value) {
    match value {
        Value::Array(rows) => {
            for row in rows {
                println!("{}", headline(row));
            }
        }
        _ => println!("{}", headline(value)),
    }
}

fn headline(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return plain(result_obj);
    };

    let prefix = map
        .get("state_code")
        .or_else(|| map.get("year"))
        .map(|v| format!("{}: ", plain(v)))
        .unwrap_or_default();

    for (key, unit) in &HEADLINES {
        if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
            let text = match (unit, as_decimal(val)) {
                (Unit::Euro, Some(d)) => format_currency(d, 2),
                _ => plain(val),
            };
            let grade_label = map
                .get("investment_grade_label")
                .or_else(|| map.get("likelihood_label"));
            let label = match (*key, grade_label) {
                ("investment_grade" | "total_score", Some(l)) => format!(" ({})", plain(l)),
                _ => String::new(),
            };
            return format!("{}{}{}", prefix, text, label);
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, plain(val)),
        None => String::new(),
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => super::scalar_text(other),
    }
}
