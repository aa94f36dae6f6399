pub mod error;
pub mod numeric;
pub mod types;

#[cfg(feature = "hidden_costs")]
pub mod hidden_costs;

#[cfg(feature = "roi")]
pub mod roi;

#[cfg(feature = "financing")]
pub mod financing;

#[cfg(feature = "evaluation")]
pub mod evaluation;

#[cfg(feature = "export")]
pub mod calculation;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "persistence")]
pub mod persistence;

pub use error::ImmoCalcError;
pub use types::*;

/// Standard result type for all immo-calc operations
pub type CalcResult<T> = Result<T, ImmoCalcError>;
