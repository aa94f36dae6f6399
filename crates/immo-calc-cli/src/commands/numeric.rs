use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use immo_calc_core::numeric::{format_grouped, parse_number, NumberStyle};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StyleArg {
    Integer,
    Decimal,
}

impl From<StyleArg> for NumberStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Integer => NumberStyle::Integer,
            StyleArg::Decimal => NumberStyle::Decimal,
        }
    }
}

/// Arguments for checking how a form field would be read
#[derive(Args)]
pub struct ParseNumberArgs {
    /// Text as typed into the form
    #[arg(allow_hyphen_values = true)]
    pub text: String,

    #[arg(long, value_enum, default_value = "integer")]
    pub style: StyleArg,

    /// Fraction digits for the German-formatted echo
    #[arg(long, default_value = "2")]
    pub digits: u32,
}

pub fn run_parse_number(args: ParseNumberArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let value = parse_number(&args.text, args.style.into());
    Ok(json!({
        "text": args.text,
        "value": value,
        "formatted": format_grouped(value, args.digits),
    }))
}
