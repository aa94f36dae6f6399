use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::states::{transfer_tax_rate, FederalState};
use crate::error::ImmoCalcError;
use crate::types::{checked_sum, percent_of, with_metadata, ComputationOutput, Money, Percent};
use crate::CalcResult;

/// Notary fee as a percentage of the purchase price.
pub const NOTARY_FEE_PERCENT: Percent = dec!(1.5);
/// Land-registry (Grundbuch) fee as a percentage of the purchase price.
pub const LAND_REGISTRY_FEE_PERCENT: Percent = dec!(0.5);
/// Buyer's share of the estate agent commission, VAT included.
pub const AGENT_COMMISSION_PERCENT: Percent = dec!(3.57);
/// Flat allowance for moving house.
pub const MOVING_COSTS: Money = dec!(3000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    Apartment,
    House,
    MultiFamily,
    Land,
    Commercial,
}

/// Expected renovation scope, priced as a share of the purchase price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenovationLevel {
    #[default]
    None,
    Light,
    Medium,
    Full,
}

impl RenovationLevel {
    pub fn price_fraction(self) -> Decimal {
        match self {
            RenovationLevel::None => Decimal::ZERO,
            RenovationLevel::Light => dec!(0.03),
            RenovationLevel::Medium => dec!(0.08),
            RenovationLevel::Full => dec!(0.15),
        }
    }
}

/// Input for the side-cost calculator. Missing fields read as zero / off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiddenCostInput {
    pub property_price: Money,
    /// Two-letter state code, e.g. "BY"
    pub state_code: String,
    pub property_type: PropertyType,
    pub include_agent: bool,
    pub renovation_level: RenovationLevel,
    pub include_moving: bool,
}

/// Full breakdown of the cost of acquiring a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenCostResult {
    pub property_price: Money,
    pub state_code: String,
    /// Transfer tax rate applied, in percent
    pub transfer_tax_rate: Percent,
    pub transfer_tax: Money,
    pub notary_fee: Money,
    pub land_registry_fee: Money,
    pub agent_commission: Money,
    pub renovation_estimate: Money,
    pub moving_costs: Money,
    /// Sum of the six cost lines above
    pub total_additional_costs: Money,
    /// Price plus all additional costs
    pub total_cost_of_ownership: Money,
    /// Additional costs as a percentage of the price
    pub additional_cost_percentage: Percent,
}

/// One row of the state-by-state comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCostComparison {
    pub state_code: String,
    pub state_name: String,
    pub transfer_tax_rate: Percent,
    pub transfer_tax: Money,
    pub total_additional_costs: Money,
    pub total_cost: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the total cost of ownership for a purchase.
///
/// Returns `None` when the property price is zero or negative, or when a
/// total leaves the decimal range. No rounding is applied; presentation code
/// formats the values.
pub fn calculate_hidden_costs(input: &HiddenCostInput) -> Option<HiddenCostResult> {
    let price = input.property_price;
    if price <= Decimal::ZERO {
        tracing::debug!(calculator = "hidden_costs", "property price missing");
        return None;
    }

    let rate = transfer_tax_rate(&input.state_code);
    let transfer_tax = percent_of(price, rate)?;
    let notary_fee = percent_of(price, NOTARY_FEE_PERCENT)?;
    let land_registry_fee = percent_of(price, LAND_REGISTRY_FEE_PERCENT)?;
    let agent_commission = if input.include_agent {
        percent_of(price, AGENT_COMMISSION_PERCENT)?
    } else {
        Decimal::ZERO
    };
    let renovation_estimate = price.checked_mul(input.renovation_level.price_fraction())?;
    let moving_costs = if input.include_moving {
        MOVING_COSTS
    } else {
        Decimal::ZERO
    };

    let total_additional_costs = checked_sum(&[
        transfer_tax,
        notary_fee,
        land_registry_fee,
        agent_commission,
        renovation_estimate,
        moving_costs,
    ])?;
    let total_cost_of_ownership = price.checked_add(total_additional_costs)?;
    let additional_cost_percentage = total_additional_costs
        .checked_div(price)?
        .checked_mul(dec!(100))?;

    tracing::trace!(%total_additional_costs, %total_cost_of_ownership, "hidden costs derived");

    Some(HiddenCostResult {
        property_price: price,
        state_code: input.state_code.clone(),
        transfer_tax_rate: rate,
        transfer_tax,
        notary_fee,
        land_registry_fee,
        agent_commission,
        renovation_estimate,
        moving_costs,
        total_additional_costs,
        total_cost_of_ownership,
        additional_cost_percentage,
    })
}

/// Price the same purchase in every federal state, cheapest first.
///
/// Renovation and moving are left out so only the state-dependent transfer
/// tax differs between rows. Ties keep the order of [`FederalState::ALL`].
/// `None` unless every state can be priced.
pub fn compare_states(
    property_price: Money,
    include_agent: bool,
) -> Option<Vec<StateCostComparison>> {
    if property_price <= Decimal::ZERO {
        return None;
    }

    let mut rows = FederalState::ALL
        .iter()
        .map(|state| {
            let input = HiddenCostInput {
                property_price,
                state_code: state.code().to_string(),
                include_agent,
                ..HiddenCostInput::default()
            };
            calculate_hidden_costs(&input).map(|r| StateCostComparison {
                state_code: state.code().to_string(),
                state_name: state.name().to_string(),
                transfer_tax_rate: r.transfer_tax_rate,
                transfer_tax: r.transfer_tax,
                total_additional_costs: r.total_additional_costs,
                total_cost: r.total_cost_of_ownership,
            })
        })
        .collect::<Option<Vec<StateCostComparison>>>()?;

    rows.sort_by(|a, b| a.total_cost.cmp(&b.total_cost));
    Some(rows)
}

/// Side-cost breakdown wrapped with warnings and metadata.
pub fn analyse_hidden_costs(
    input: &HiddenCostInput,
) -> CalcResult<ComputationOutput<HiddenCostResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = calculate_hidden_costs(input).ok_or_else(|| {
        ImmoCalcError::insufficient(
            "hidden_costs",
            "property_price must be positive and within range",
        )
    })?;

    if FederalState::from_code(&input.state_code).is_none() {
        warnings.push(format!(
            "Unknown state code '{}': default transfer tax of {}% applied",
            input.state_code, result.transfer_tax_rate
        ));
    }
    if result.additional_cost_percentage > dec!(15) {
        warnings.push(format!(
            "Additional costs are {:.1}% of the price; most lenders do not finance these",
            result.additional_cost_percentage
        ));
    }
    if input.renovation_level == RenovationLevel::Full {
        warnings.push(
            "Full renovation estimate is a rough allowance; obtain contractor quotes".into(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "German purchase side costs (Kaufnebenkosten)",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> HiddenCostInput {
        HiddenCostInput {
            property_price: dec!(400000),
            state_code: "BY".into(),
            property_type: PropertyType::Apartment,
            include_agent: true,
            renovation_level: RenovationLevel::None,
            include_moving: false,
        }
    }

    #[test]
    fn test_bavaria_with_agent() {
        let r = calculate_hidden_costs(&sample_input()).unwrap();

        assert_eq!(r.transfer_tax, dec!(14000));
        assert_eq!(r.notary_fee, dec!(6000));
        assert_eq!(r.land_registry_fee, dec!(2000));
        assert_eq!(r.agent_commission, dec!(14280));
        assert_eq!(r.renovation_estimate, Decimal::ZERO);
        assert_eq!(r.moving_costs, Decimal::ZERO);
        assert_eq!(r.total_additional_costs, dec!(36280));
        assert_eq!(r.total_cost_of_ownership, dec!(436280));
        assert_eq!(r.additional_cost_percentage, dec!(9.07));
    }

    #[test]
    fn test_agent_and_moving_flags() {
        let mut input = sample_input();
        input.include_agent = false;
        input.include_moving = true;
        let r = calculate_hidden_costs(&input).unwrap();
        assert_eq!(r.agent_commission, Decimal::ZERO);
        assert_eq!(r.moving_costs, MOVING_COSTS);
    }

    #[test]
    fn test_renovation_levels() {
        let mut input = sample_input();
        for (level, expected) in [
            (RenovationLevel::Light, dec!(12000)),
            (RenovationLevel::Medium, dec!(32000)),
            (RenovationLevel::Full, dec!(60000)),
        ] {
            input.renovation_level = level;
            let r = calculate_hidden_costs(&input).unwrap();
            assert_eq!(r.renovation_estimate, expected);
        }
    }

    #[test]
    fn test_unknown_state_uses_default_rate() {
        let mut input = sample_input();
        input.state_code = "ZZ".into();
        let r = calculate_hidden_costs(&input).unwrap();
        assert_eq!(r.transfer_tax_rate, dec!(5.0));
        assert_eq!(r.transfer_tax, dec!(20000));

        let out = analyse_hidden_costs(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Unknown state code")));
    }

    #[test]
    fn test_non_positive_price_is_none() {
        let mut input = sample_input();
        input.property_price = Decimal::ZERO;
        assert!(calculate_hidden_costs(&input).is_none());
        input.property_price = dec!(-1);
        assert!(calculate_hidden_costs(&input).is_none());
        assert!(matches!(
            analyse_hidden_costs(&input),
            Err(ImmoCalcError::InsufficientInput { .. })
        ));
    }

    #[test]
    fn test_compare_states_sorted() {
        let rows = compare_states(dec!(300000), false).unwrap();
        assert_eq!(rows.len(), 16);
        assert!(rows.windows(2).all(|w| w[0].total_cost <= w[1].total_cost));
        assert_eq!(rows[0].state_code, "BY");
        assert_eq!(rows[15].transfer_tax_rate, dec!(6.5));
    }

    #[test]
    fn test_price_near_decimal_limit() {
        let mut input = sample_input();
        input.include_agent = false;
        input.property_price = dec!(30000000000000000000000000000);
        let r = calculate_hidden_costs(&input).unwrap();
        assert_eq!(r.total_cost_of_ownership, r.property_price + r.total_additional_costs);
        assert_eq!(r.additional_cost_percentage, dec!(5.5));

        input.property_price = Decimal::MAX;
        assert!(calculate_hidden_costs(&input).is_none());
        assert!(analyse_hidden_costs(&input).is_err());
    }

    #[test]
    fn test_compare_states_out_of_range_price() {
        assert!(compare_states(Decimal::MAX, false).is_none());
    }

    #[test]
    fn test_compare_states_rejects_zero_price() {
        assert!(compare_states(Decimal::ZERO, true).is_none());
    }

    #[test]
    fn test_methodology_string() {
        let out = analyse_hidden_costs(&sample_input()).unwrap();
        assert_eq!(out.methodology, "German purchase side costs (Kaufnebenkosten)");
        assert!(out.warnings.is_empty());
    }
}
