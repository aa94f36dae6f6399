//! Buy-to-let return metrics with a ten-year amortisation-aware projection.

pub mod mortgage;
pub mod projection;
pub mod returns;

pub use mortgage::{amortize_months, monthly_payment};
pub use projection::{simple_projection, ProjectionYear, SimpleProjectionYear};
pub use returns::{
    analyse_roi, calculate_roi, GradeBreakdown, InvestmentGradeLabel, RoiInput, RoiResult,
};
