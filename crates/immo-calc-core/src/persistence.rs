//! Saved calculations.
//!
//! Records hold the input exactly as entered plus a handful of key totals, so
//! lists can be rendered without re-running the calculators. A share token,
//! when requested, lets someone without the owner's id open the record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{CalculationInput, CalculatorKind};
use crate::error::ImmoCalcError;
use crate::CalcResult;

const ID_LENGTH: usize = 12;
const SHARE_TOKEN_LENGTH: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub calculation: CalculationInput,
    /// Issue a share token for the saved record
    #[serde(default)]
    pub share: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub calculation: CalculationInput,
    pub summary: BTreeMap<String, Decimal>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
}

/// List entry: everything except the full input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculationSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub calculator: CalculatorKind,
    pub summary: BTreeMap<String, Decimal>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
}

impl SavedCalculation {
    /// Build a new record, running the calculator to fill in the summary.
    ///
    /// Fails with [`ImmoCalcError::InsufficientInput`] when the input does
    /// not produce a result; incomplete calculations are never stored.
    pub fn new(request: SaveRequest, created_at: DateTime<Utc>) -> CalcResult<Self> {
        let kind = request.calculation.kind();
        let summary = request.calculation.summary().ok_or_else(|| {
            ImmoCalcError::insufficient(&kind.to_string(), "input does not produce a result")
        })?;

        Ok(SavedCalculation {
            id: random_token(ID_LENGTH),
            name: request.name,
            calculation: request.calculation,
            summary,
            created_at,
            share_token: request.share.then(|| random_token(SHARE_TOKEN_LENGTH)),
        })
    }

    pub fn to_summary(&self) -> SavedCalculationSummary {
        SavedCalculationSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            calculator: self.calculation.kind(),
            summary: self.summary.clone(),
            created_at: self.created_at,
            share_token: self.share_token.clone(),
        }
    }
}

/// Storage abstraction for saved calculations.
pub trait CalculationStore {
    fn save(&mut self, request: SaveRequest) -> CalcResult<SavedCalculation>;
    fn get(&self, id: &str) -> CalcResult<Option<SavedCalculation>>;
    fn get_by_share_token(&self, token: &str) -> CalcResult<Option<SavedCalculation>>;
    /// Newest first.
    fn list(&self) -> CalcResult<Vec<SavedCalculationSummary>>;
    /// Returns whether a record was removed.
    fn delete(&mut self, id: &str) -> CalcResult<bool>;
}

/// Store backed by a map; also the working set of file-based stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    records: BTreeMap<String, SavedCalculation>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert an existing record, e.g. one read back from disk.
    pub fn insert(&mut self, record: SavedCalculation) -> CalcResult<()> {
        if self.records.contains_key(&record.id) {
            return Err(ImmoCalcError::Storage(format!(
                "duplicate calculation id '{}'",
                record.id
            )));
        }
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn records(&self) -> impl Iterator<Item = &SavedCalculation> {
        self.records.values()
    }
}

impl CalculationStore for InMemoryStore {
    fn save(&mut self, request: SaveRequest) -> CalcResult<SavedCalculation> {
        let record = SavedCalculation::new(request, Utc::now())?;
        self.insert(record.clone())?;
        tracing::info!(
            id = %record.id,
            calculator = %record.calculation.kind(),
            "calculation saved"
        );
        Ok(record)
    }

    fn get(&self, id: &str) -> CalcResult<Option<SavedCalculation>> {
        Ok(self.records.get(id).cloned())
    }

    fn get_by_share_token(&self, token: &str) -> CalcResult<Option<SavedCalculation>> {
        Ok(self
            .records
            .values()
            .find(|r| r.share_token.as_deref() == Some(token))
            .cloned())
    }

    fn list(&self) -> CalcResult<Vec<SavedCalculationSummary>> {
        let mut out: Vec<SavedCalculationSummary> =
            self.records.values().map(SavedCalculation::to_summary).collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    fn delete(&mut self, id: &str) -> CalcResult<bool> {
        Ok(self.records.remove(id).is_some())
    }
}

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
