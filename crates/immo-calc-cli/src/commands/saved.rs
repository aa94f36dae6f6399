use std::fs;

use chrono::Utc;
use clap::Args;
use serde_json::{json, Value};

use immo_calc_core::calculation::CalculationInput;
use immo_calc_core::export;
use immo_calc_core::persistence::{CalculationStore, SaveRequest};
use immo_calc_core::ImmoCalcError;

use crate::config::CliConfig;
use crate::input;
use crate::store::JsonFileStore;

/// Arguments for producing a downloadable export document
#[derive(Args)]
pub struct ExportArgs {
    /// JSON/YAML file of the form {"calculator": ..., "input": {...}}
    #[arg(long)]
    pub input: Option<String>,

    /// Write the document here instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

/// Arguments for saving a calculation
#[derive(Args)]
pub struct SaveArgs {
    /// JSON/YAML file of the form {"calculator": ..., "input": {...}}
    #[arg(long)]
    pub input: Option<String>,

    /// Label shown in `list`
    #[arg(long)]
    pub name: Option<String>,

    /// Issue a share token for the record
    #[arg(long)]
    pub share: bool,
}

/// Arguments for looking up a saved calculation
#[derive(Args)]
pub struct ShowArgs {
    /// Record id
    #[arg(required_unless_present = "share_token")]
    pub id: Option<String>,

    /// Look up by share token instead of id
    #[arg(long, conflicts_with = "id")]
    pub share_token: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Record id
    pub id: String,
}

const CALCULATION_SHAPE: &str = "{\"calculator\": ..., \"input\": {...}}";

fn read_calculation(path: Option<&str>) -> Result<CalculationInput, Box<dyn std::error::Error>> {
    input::load(path)?
        .ok_or_else(|| format!("--input <file> or stdin required: {}", CALCULATION_SHAPE).into())
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let calculation = read_calculation(args.input.as_deref())?;
    let kind = calculation.kind();
    let document = export::export(&calculation, Utc::now()).ok_or_else(|| {
        ImmoCalcError::InsufficientInput {
            calculator: kind.to_string(),
            reason: "input does not produce a result".into(),
        }
    })?;

    if let Some(path) = args.out {
        fs::write(&path, document.to_json_pretty()?)
            .map_err(|e| format!("Failed to write '{}': {}", path, e))?;
        tracing::info!(path = %path, calculator = %kind, "export written");
        return Ok(json!({ "written": path, "calculator": kind }));
    }

    Ok(serde_json::to_value(document)?)
}

pub fn run_save(args: SaveArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let calculation = read_calculation(args.input.as_deref())?;
    let mut store = JsonFileStore::open(&config.store_path)?;
    let saved = store.save(SaveRequest {
        name: args.name,
        calculation,
        share: args.share,
    })?;
    tracing::info!(store = %store.path().display(), id = %saved.id, "record written");
    Ok(serde_json::to_value(saved.to_summary())?)
}

pub fn run_list(config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&config.store_path)?;
    Ok(serde_json::to_value(store.list()?)?)
}

pub fn run_show(args: ShowArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(&config.store_path)?;
    let (found, key) = match (&args.share_token, &args.id) {
        (Some(token), _) => (store.get_by_share_token(token)?, token.clone()),
        (None, Some(id)) => (store.get(id)?, id.clone()),
        (None, None) => return Err("an id or --share-token is required".into()),
    };
    let record = found.ok_or(ImmoCalcError::NotFound(key))?;
    Ok(serde_json::to_value(record)?)
}

pub fn run_delete(
    args: DeleteArgs,
    config: &CliConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut store = JsonFileStore::open(&config.store_path)?;
    if !store.delete(&args.id)? {
        return Err(ImmoCalcError::NotFound(args.id).into());
    }
    Ok(json!({ "deleted": args.id }))
}
