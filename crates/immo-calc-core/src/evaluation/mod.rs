//! Year-one investment analysis for a German buy-to-let flat.

pub mod analysis;

pub use analysis::{
    analyse_property, evaluate, EvaluationResults, FinancingTerms, OperatingCosts,
    PropertyEvaluationState, PropertyInfo, RentInfo,
};
