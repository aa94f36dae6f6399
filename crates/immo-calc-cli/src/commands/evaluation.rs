use clap::Args;
use serde_json::Value;

use immo_calc_core::evaluation::{self, PropertyEvaluationState};

use crate::input;

/// Arguments for the year-one property evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to JSON/YAML file with property_info, rent, operating_costs and financing
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let state: PropertyEvaluationState = input::load(args.input.as_deref())?
        .ok_or("--input <file> or stdin required for property evaluation")?;
    let result = evaluation::analyse_property(&state)?;
    Ok(serde_json::to_value(result)?)
}
