use clap::Args;
use serde_json::Value;

use immo_calc_core::hidden_costs::{self, HiddenCostInput};

use crate::commands::{amount, parse_choice};
use crate::input;

/// Arguments for the purchase side-cost breakdown
#[derive(Args)]
pub struct HiddenCostsArgs {
    /// Purchase price in EUR (German grouping allowed, e.g. 400.000)
    #[arg(long)]
    pub price: Option<String>,

    /// Two-letter federal state code, e.g. BY
    #[arg(long, default_value = "BY")]
    pub state: String,

    /// apartment, house, multi-family, land or commercial
    #[arg(long, default_value = "apartment")]
    pub property_type: String,

    /// Include the estate agent's commission (Maklerprovision)
    #[arg(long)]
    pub agent: bool,

    /// none, light, medium or full
    #[arg(long, default_value = "none")]
    pub renovation: String,

    /// Include a flat moving allowance
    #[arg(long)]
    pub moving: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for ranking all sixteen states by total cost
#[derive(Args)]
pub struct CompareStatesArgs {
    /// Purchase price in EUR
    #[arg(long)]
    pub price: String,

    /// Include the estate agent's commission
    #[arg(long)]
    pub agent: bool,
}

pub fn run_hidden_costs(args: HiddenCostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cost_input: HiddenCostInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => HiddenCostInput {
            property_price: amount(args.price.as_deref()),
            state_code: args.state.trim().to_ascii_uppercase(),
            property_type: parse_choice("property-type", &args.property_type)?,
            include_agent: args.agent,
            renovation_level: parse_choice("renovation", &args.renovation)?,
            include_moving: args.moving,
        },
    };
    let result = hidden_costs::analyse_hidden_costs(&cost_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare_states(args: CompareStatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let price = amount(Some(args.price.as_str()));
    let rows = hidden_costs::compare_states(price, args.agent)
        .ok_or("--price must be a positive amount")?;
    Ok(serde_json::to_value(rows)?)
}
