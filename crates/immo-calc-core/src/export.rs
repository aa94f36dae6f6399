use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::calculation::{CalculationInput, CalculationOutcome};

/// Self-describing download of a calculation: the input exactly as entered,
/// the full result, and when the document was produced.
///
/// Serializes as `{"calculator", "input", "result", "generated_at"}`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    #[serde(flatten)]
    pub calculation: CalculationInput,
    pub result: CalculationOutcome,
    pub generated_at: DateTime<Utc>,
}

/// Build an export document, or `None` when the input yields no result.
///
/// The timestamp is passed in so the calculators themselves never read the
/// clock.
pub fn export(
    calculation: &CalculationInput,
    generated_at: DateTime<Utc>,
) -> Option<ExportDocument> {
    let result = calculation.compute()?;
    Some(ExportDocument {
        calculation: calculation.clone(),
        result,
        generated_at,
    })
}

impl ExportDocument {
    pub fn to_json_pretty(&self) -> crate::CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financing::{
        EmploymentStatus, FinancingAssessmentInput, ResidencyStatus, SchufaRating,
    };
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn financing() -> CalculationInput {
        CalculationInput::Financing(FinancingAssessmentInput {
            employment_status: Some(EmploymentStatus::Permanent),
            employment_years: dec!(5),
            monthly_net_income: dec!(4000),
            monthly_debt: dec!(400),
            available_down_payment: dec!(90000),
            schufa_rating: Some(SchufaRating::Good),
            residency_status: Some(ResidencyStatus::GermanCitizen),
        })
    }

    #[test]
    fn test_export_shape() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let doc = export(&financing(), at).unwrap();
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["calculator"], "financing");
        assert_eq!(value["input"]["employment_status"], "permanent");
        assert_eq!(value["input"]["residency_status"], "german_citizen");
        assert_eq!(value["result"]["likelihood_label"], "High");
        assert_eq!(value["result"]["scores"]["tenure_score"], 10);
        assert_eq!(value["generated_at"], "2024-03-01T12:00:00Z");
    }

    #[test]
    fn test_export_is_deterministic_for_fixed_time() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let a = export(&financing(), at).unwrap().to_json_pretty().unwrap();
        let b = export(&financing(), at).unwrap().to_json_pretty().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_export_requires_result() {
        let input = CalculationInput::Financing(FinancingAssessmentInput::default());
        assert!(export(&input, Utc::now()).is_none());
    }
}
