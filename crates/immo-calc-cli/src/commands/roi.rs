use clap::Args;
use serde_json::Value;

use immo_calc_core::roi::{self, RoiInput};
use rust_decimal::Decimal;

use crate::commands::{amount, monthly_amount};
use crate::input;

/// Arguments for buy-to-let return analysis
#[derive(Args)]
pub struct RoiArgs {
    /// Purchase price in whole EUR (German grouping allowed, e.g. 300.000)
    #[arg(long)]
    pub price: Option<String>,

    /// Equity put into the purchase, whole EUR
    #[arg(long)]
    pub down_payment: Option<String>,

    /// Cold rent per month; cents after `.` or `,`, e.g. 850.50 or 1.250,50
    #[arg(long)]
    pub rent: Option<String>,

    /// Owner's running costs per month, with cents like --rent
    #[arg(long)]
    pub expenses: Option<String>,

    /// Annual appreciation in percent
    #[arg(long, default_value = "2")]
    pub appreciation: Decimal,

    /// Vacancy in percent of gross rent
    #[arg(long, default_value = "0")]
    pub vacancy: Decimal,

    /// Mortgage interest in percent p.a.
    #[arg(long, default_value = "0")]
    pub rate: Decimal,

    /// Mortgage term in years
    #[arg(long, default_value = "25")]
    pub term: u32,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl RoiArgs {
    fn into_input(self) -> Result<RoiInput, Box<dyn std::error::Error>> {
        match input::load(self.input.as_deref())? {
            Some(parsed) => Ok(parsed),
            None => Ok(self.flags_input()),
        }
    }

    fn flags_input(&self) -> RoiInput {
        RoiInput {
            purchase_price: amount(self.price.as_deref()),
            down_payment: amount(self.down_payment.as_deref()),
            monthly_rent: monthly_amount(self.rent.as_deref()),
            monthly_expenses: monthly_amount(self.expenses.as_deref()),
            annual_appreciation_percent: self.appreciation,
            vacancy_rate_percent: self.vacancy,
            mortgage_rate_percent: self.rate,
            mortgage_term_years: self.term,
        }
    }
}

pub fn run_roi(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi_input = args.into_input()?;
    let result = roi::analyse_roi(&roi_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Five-year projection without amortisation, kept for older saved reports.
pub fn run_roi_legacy(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi_input = args.into_input()?;
    let rows = roi::simple_projection(&roi_input)
        .ok_or("purchase_price and monthly_rent must be positive")?;
    Ok(serde_json::to_value(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rust_decimal_macros::dec;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: RoiArgs,
    }

    #[test]
    fn test_monthly_flags_keep_cents() {
        let harness = Harness::parse_from([
            "roi",
            "--price",
            "300.000",
            "--down-payment",
            "60.000",
            "--rent",
            "850.50",
            "--expenses",
            "120,75",
        ]);
        let input = harness.args.flags_input();
        assert_eq!(input.purchase_price, dec!(300000));
        assert_eq!(input.down_payment, dec!(60000));
        assert_eq!(input.monthly_rent, dec!(850.50));
        assert_eq!(input.monthly_expenses, dec!(120.75));
        assert_eq!(input.mortgage_term_years, 25);
    }
}
