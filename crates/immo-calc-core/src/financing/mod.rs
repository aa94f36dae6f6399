//! Mortgage eligibility scoring for buyers in Germany.

pub mod advisory;
pub mod scoring;

pub use scoring::{
    analyse_financing, calculate_assessment, EmploymentStatus, FinancingAssessmentInput,
    FinancingAssessmentResult, LikelihoodLabel, ResidencyStatus, SchufaRating, ScoreBreakdown,
};
