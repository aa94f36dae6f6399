//! A single tagged type for "any calculator input", used by export and
//! persistence so they don't need one code path per calculator.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::evaluation::{evaluate, EvaluationResults, PropertyEvaluationState};
use crate::financing::{calculate_assessment, FinancingAssessmentInput, FinancingAssessmentResult};
use crate::hidden_costs::{calculate_hidden_costs, HiddenCostInput, HiddenCostResult};
use crate::roi::{calculate_roi, RoiInput, RoiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    HiddenCosts,
    Roi,
    Financing,
    PropertyEvaluation,
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculatorKind::HiddenCosts => write!(f, "hidden_costs"),
            CalculatorKind::Roi => write!(f, "roi"),
            CalculatorKind::Financing => write!(f, "financing"),
            CalculatorKind::PropertyEvaluation => write!(f, "property_evaluation"),
        }
    }
}

/// Input for one of the four calculators, serialized as
/// `{"calculator": "...", "input": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", content = "input", rename_all = "snake_case")]
pub enum CalculationInput {
    HiddenCosts(HiddenCostInput),
    Roi(RoiInput),
    Financing(FinancingAssessmentInput),
    PropertyEvaluation(PropertyEvaluationState),
}

/// Result of whichever calculator ran. Serialized without a tag; the
/// accompanying input carries the calculator name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculationOutcome {
    HiddenCosts(HiddenCostResult),
    Roi(RoiResult),
    Financing(FinancingAssessmentResult),
    PropertyEvaluation(EvaluationResults),
}

impl CalculationInput {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationInput::HiddenCosts(_) => CalculatorKind::HiddenCosts,
            CalculationInput::Roi(_) => CalculatorKind::Roi,
            CalculationInput::Financing(_) => CalculatorKind::Financing,
            CalculationInput::PropertyEvaluation(_) => CalculatorKind::PropertyEvaluation,
        }
    }

    /// Run the matching calculator. `None` when its required fields are missing.
    pub fn compute(&self) -> Option<CalculationOutcome> {
        match self {
            CalculationInput::HiddenCosts(i) => {
                calculate_hidden_costs(i).map(CalculationOutcome::HiddenCosts)
            }
            CalculationInput::Roi(i) => calculate_roi(i).map(CalculationOutcome::Roi),
            CalculationInput::Financing(i) => {
                calculate_assessment(i).map(CalculationOutcome::Financing)
            }
            CalculationInput::PropertyEvaluation(s) => {
                evaluate(s).map(CalculationOutcome::PropertyEvaluation)
            }
        }
    }

    /// Key totals stored alongside a saved calculation.
    pub fn summary(&self) -> Option<BTreeMap<String, Decimal>> {
        self.compute().map(|outcome| outcome.summary())
    }
}

impl CalculationOutcome {
    pub fn summary(&self) -> BTreeMap<String, Decimal> {
        let pairs: Vec<(&str, Decimal)> = match self {
            CalculationOutcome::HiddenCosts(r) => vec![
                ("total_additional_costs", r.total_additional_costs),
                ("total_cost_of_ownership", r.total_cost_of_ownership),
                ("additional_cost_percentage", r.additional_cost_percentage),
            ],
            CalculationOutcome::Roi(r) => vec![
                ("annual_cash_flow", r.annual_cash_flow),
                ("gross_yield", r.gross_yield),
                ("cap_rate", r.cap_rate),
                ("cash_on_cash_return", r.cash_on_cash_return),
                ("investment_grade", r.investment_grade),
            ],
            CalculationOutcome::Financing(r) => vec![
                ("total_score", r.total_score),
                ("max_loan_estimate", r.max_loan_estimate),
                ("recommended_down_payment_percent", r.recommended_down_payment_percent),
            ],
            CalculationOutcome::PropertyEvaluation(r) => vec![
                ("total_investment", r.total_investment),
                ("gross_rental_yield", r.gross_rental_yield),
                ("cashflow_after_tax", r.cashflow_after_tax),
                ("return_on_equity", r.return_on_equity),
            ],
        };
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }
}
