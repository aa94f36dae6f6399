use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use immo_calc_core::numeric::{self, NumberStyle};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_input<T: DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

/// Serialize a calculator result; `None` (insufficient input) becomes `null` in JS.
fn to_json_or_null<T: Serialize>(result: Option<T>) -> NapiResult<Option<String>> {
    result
        .map(|r| serde_json::to_string(&r).map_err(to_napi_error))
        .transpose()
}

fn parse_decimal(value: &str) -> NapiResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Hidden costs
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_hidden_costs(input_json: String) -> NapiResult<Option<String>> {
    let input: immo_calc_core::hidden_costs::HiddenCostInput = parse_input(&input_json)?;
    to_json_or_null(immo_calc_core::hidden_costs::calculate_hidden_costs(&input))
}

#[napi]
pub fn analyse_hidden_costs(input_json: String) -> NapiResult<String> {
    let input: immo_calc_core::hidden_costs::HiddenCostInput = parse_input(&input_json)?;
    let output =
        immo_calc_core::hidden_costs::analyse_hidden_costs(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_states(property_price: String, include_agent: bool) -> NapiResult<Option<String>> {
    let price = parse_decimal(&property_price)?;
    to_json_or_null(immo_calc_core::hidden_costs::compare_states(price, include_agent))
}

// ---------------------------------------------------------------------------
// ROI
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_roi(input_json: String) -> NapiResult<Option<String>> {
    let input: immo_calc_core::roi::RoiInput = parse_input(&input_json)?;
    to_json_or_null(immo_calc_core::roi::calculate_roi(&input))
}

#[napi]
pub fn analyse_roi(input_json: String) -> NapiResult<String> {
    let input: immo_calc_core::roi::RoiInput = parse_input(&input_json)?;
    let output = immo_calc_core::roi::analyse_roi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simple_roi_projection(input_json: String) -> NapiResult<Option<String>> {
    let input: immo_calc_core::roi::RoiInput = parse_input(&input_json)?;
    to_json_or_null(immo_calc_core::roi::simple_projection(&input))
}

// ---------------------------------------------------------------------------
// Financing
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_assessment(input_json: String) -> NapiResult<Option<String>> {
    let input: immo_calc_core::financing::FinancingAssessmentInput = parse_input(&input_json)?;
    to_json_or_null(immo_calc_core::financing::calculate_assessment(&input))
}

#[napi]
pub fn analyse_financing(input_json: String) -> NapiResult<String> {
    let input: immo_calc_core::financing::FinancingAssessmentInput = parse_input(&input_json)?;
    let output = immo_calc_core::financing::analyse_financing(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Property evaluation
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_property(state_json: String) -> NapiResult<Option<String>> {
    let state: immo_calc_core::evaluation::PropertyEvaluationState = parse_input(&state_json)?;
    to_json_or_null(immo_calc_core::evaluation::evaluate(&state))
}

#[napi]
pub fn analyse_property(state_json: String) -> NapiResult<String> {
    let state: immo_calc_core::evaluation::PropertyEvaluationState = parse_input(&state_json)?;
    let output = immo_calc_core::evaluation::analyse_property(&state).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// `calculation_json` is `{"calculator": ..., "input": {...}}`.
#[napi]
pub fn export_document(calculation_json: String) -> NapiResult<Option<String>> {
    let calculation: immo_calc_core::calculation::CalculationInput =
        parse_input(&calculation_json)?;
    immo_calc_core::export::export(&calculation, chrono::Utc::now())
        .map(|doc| doc.to_json_pretty().map_err(to_napi_error))
        .transpose()
}

// ---------------------------------------------------------------------------
// Numeric helpers
// ---------------------------------------------------------------------------

/// Returns the parsed value as a decimal string.
#[napi]
pub fn parse_number(text: String, allow_decimal: bool) -> String {
    let style = if allow_decimal {
        NumberStyle::Decimal
    } else {
        NumberStyle::Integer
    };
    numeric::parse_number(&text, style).to_string()
}

#[napi]
pub fn format_currency(value: String, fraction_digits: u32) -> NapiResult<String> {
    Ok(numeric::format_currency(parse_decimal(&value)?, fraction_digits))
}

#[napi]
pub fn format_percent(value: String, fraction_digits: u32) -> NapiResult<String> {
    Ok(numeric::format_percent(parse_decimal(&value)?, fraction_digits))
}
