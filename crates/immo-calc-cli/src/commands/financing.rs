use clap::Args;
use serde_json::Value;

use immo_calc_core::financing::{self, FinancingAssessmentInput};
use rust_decimal::Decimal;

use crate::commands::{amount, monthly_amount, parse_choice};
use crate::input;

/// Arguments for the mortgage eligibility assessment
#[derive(Args)]
pub struct FinancingArgs {
    /// civil-servant, permanent, fixed-term, self-employed, freelance or other
    #[arg(long)]
    pub employment: Option<String>,

    /// Years with the current employer
    #[arg(long, default_value = "0")]
    pub years: Decimal,

    /// Net income per month; cents after `.` or `,`, e.g. 3200.50 or 3.200,50
    #[arg(long)]
    pub income: Option<String>,

    /// Existing debt payments per month, with cents like --income
    #[arg(long)]
    pub debt: Option<String>,

    /// Cash available for the down payment, whole EUR
    #[arg(long)]
    pub down_payment: Option<String>,

    /// excellent, good, satisfactory, adequate, poor or unknown
    #[arg(long)]
    pub schufa: Option<String>,

    /// german-citizen, eu-citizen, permanent-resident, temporary-resident or non-eu
    #[arg(long)]
    pub residency: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_financing(args: FinancingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assessment_input: FinancingAssessmentInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => flags_input(&args)?,
    };
    let result = financing::analyse_financing(&assessment_input)?;
    Ok(serde_json::to_value(result)?)
}

fn flags_input(
    args: &FinancingArgs,
) -> Result<FinancingAssessmentInput, Box<dyn std::error::Error>> {
    Ok(FinancingAssessmentInput {
        employment_status: args
            .employment
            .as_deref()
            .map(|v| parse_choice("employment", v))
            .transpose()?,
        employment_years: args.years,
        monthly_net_income: monthly_amount(args.income.as_deref()),
        monthly_debt: monthly_amount(args.debt.as_deref()),
        available_down_payment: amount(args.down_payment.as_deref()),
        schufa_rating: args
            .schufa
            .as_deref()
            .map(|v| parse_choice("schufa", v))
            .transpose()?,
        residency_status: args
            .residency
            .as_deref()
            .map(|v| parse_choice("residency", v))
            .transpose()?,
    })
}
