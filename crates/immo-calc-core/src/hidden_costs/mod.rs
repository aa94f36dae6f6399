//! Purchase side-costs (Kaufnebenkosten) for a single property.

pub mod costs;
pub mod states;

pub use costs::{
    analyse_hidden_costs, calculate_hidden_costs, compare_states, HiddenCostInput,
    HiddenCostResult, PropertyType, RenovationLevel, StateCostComparison,
};
pub use states::{transfer_tax_rate, FederalState};
