use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ImmoCalcError;
use crate::types::{
    checked_sum, percent_of, ratio_or_zero, with_metadata, ComputationOutput, Money, Percent,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Input groups
// ---------------------------------------------------------------------------

/// The property and the side costs of buying it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyInfo {
    pub address: String,
    pub square_meters: Decimal,
    pub purchase_price: Money,
    pub broker_fee_percent: Percent,
    pub notary_fee_percent: Percent,
    pub land_registry_fee_percent: Percent,
    pub transfer_tax_percent: Percent,
}

/// Rent, depreciation and tax assumptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentInfo {
    /// Net cold rent per square metre and month
    pub rent_per_sqm: Money,
    pub parking_rent: Money,
    /// AfA rate, e.g. 2 for buildings completed 1925-2022
    pub depreciation_rate_percent: Percent,
    /// Share of the price attributable to the building rather than the land
    pub building_share_percent: Percent,
    pub value_increase_percent: Percent,
    pub rent_increase_percent: Percent,
    pub cost_increase_percent: Percent,
    pub marginal_tax_rate_percent: Percent,
}

/// Monthly running costs in EUR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingCosts {
    /// Hausgeld passed on to the tenant
    pub hausgeld_allocable: Money,
    pub property_tax_monthly: Money,
    /// Hausgeld the landlord carries (administration, repairs)
    pub hausgeld_non_allocable: Money,
    /// Contribution to the maintenance reserve
    pub reserves_portion: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingTerms {
    /// Loan as a percentage of the purchase price
    pub loan_percent: Percent,
    pub interest_rate_percent: Percent,
    /// Initial repayment (Tilgung) per year
    pub repayment_rate_percent: Percent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyEvaluationState {
    pub property_info: PropertyInfo,
    pub rent: RentInfo,
    pub operating_costs: OperatingCosts,
    pub financing: FinancingTerms,
}

/// Year-one snapshot. Yields and returns are percentages (4.15 = 4.15%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub price_per_sqm: Money,

    pub total_incidental_costs_percent: Percent,
    pub total_incidental_costs: Money,
    pub total_investment: Money,

    pub total_allocable_costs: Money,
    pub total_non_allocable_costs: Money,
    pub total_hausgeld: Money,

    pub cold_rent_monthly: Money,
    pub warm_rent_monthly: Money,
    pub net_cold_rent_yearly: Money,
    pub gross_rental_yield: Percent,
    pub net_rental_yield: Percent,
    /// Kaufpreisfaktor: price over yearly net cold rent
    pub cold_rent_factor: Decimal,

    pub loan_amount: Money,
    pub equity_amount: Money,
    pub equity_ratio_percent: Percent,
    pub monthly_interest: Money,
    pub monthly_repayment: Money,
    pub debt_service_monthly: Money,

    pub building_value: Money,
    pub depreciation_yearly: Money,
    pub depreciation_monthly: Money,
    pub taxable_cashflow_monthly: Money,
    /// Negative when losses reduce other taxable income
    pub tax_yearly: Money,
    pub tax_monthly: Money,

    pub cashflow_before_tax: Money,
    pub cashflow_after_tax: Money,
    pub is_positive_cashflow: bool,

    pub annual_cashflow: Money,
    pub annual_appreciation: Money,
    pub return_on_equity: Percent,
    pub return_on_equity_without_appreciation: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate a buy-to-let purchase for its first year.
///
/// Returns `None` unless both the purchase price and the living area are
/// positive, or when an amount leaves the decimal range. Each step below only
/// consumes values from earlier steps.
pub fn evaluate(state: &PropertyEvaluationState) -> Option<EvaluationResults> {
    let info = &state.property_info;
    let rent = &state.rent;
    let costs = &state.operating_costs;
    let financing = &state.financing;

    let price = info.purchase_price;
    if price <= Decimal::ZERO || info.square_meters <= Decimal::ZERO {
        tracing::debug!(calculator = "evaluation", "purchase price or living area missing");
        return None;
    }

    // 1. Price per square metre
    let price_per_sqm = price.checked_div(info.square_meters)?;

    // 2. Incidental costs
    let total_incidental_costs_percent = checked_sum(&[
        info.broker_fee_percent,
        info.notary_fee_percent,
        info.land_registry_fee_percent,
        info.transfer_tax_percent,
    ])?;
    let total_incidental_costs = percent_of(price, total_incidental_costs_percent)?;
    let total_investment = price.checked_add(total_incidental_costs)?;

    // 3. Hausgeld
    let total_allocable_costs = costs
        .hausgeld_allocable
        .checked_add(costs.property_tax_monthly)?;
    let total_non_allocable_costs = costs
        .hausgeld_non_allocable
        .checked_add(costs.reserves_portion)?;
    let total_hausgeld = total_allocable_costs.checked_add(total_non_allocable_costs)?;

    // 4. Rent
    let cold_rent_monthly = rent
        .rent_per_sqm
        .checked_mul(info.square_meters)?
        .checked_add(rent.parking_rent)?;
    let warm_rent_monthly = cold_rent_monthly.checked_add(total_allocable_costs)?;
    let net_cold_rent_yearly = cold_rent_monthly.checked_mul(dec!(12))?;

    // 5. Yield
    let gross_rental_yield = net_cold_rent_yearly
        .checked_div(price)?
        .checked_mul(dec!(100))?;
    let cold_rent_factor = ratio_or_zero(price, net_cold_rent_yearly)?;

    // 6. Financing: the loan is sized on the price, equity covers the rest
    let loan_amount = percent_of(price, financing.loan_percent)?;
    let equity_amount = total_investment.checked_sub(loan_amount)?;
    let equity_ratio_percent =
        ratio_or_zero(equity_amount, total_investment)?.checked_mul(dec!(100))?;
    let monthly_interest = percent_of(loan_amount, financing.interest_rate_percent)? / dec!(12);
    let monthly_repayment = percent_of(loan_amount, financing.repayment_rate_percent)? / dec!(12);
    let debt_service_monthly = monthly_interest.checked_add(monthly_repayment)?;

    // 7. Tax: all incidental costs join the depreciation base
    let building_value =
        percent_of(price, rent.building_share_percent)?.checked_add(total_incidental_costs)?;
    let depreciation_yearly = percent_of(building_value, rent.depreciation_rate_percent)?;
    let depreciation_monthly = depreciation_yearly / dec!(12);
    let taxable_cashflow_monthly = warm_rent_monthly
        .checked_sub(total_hausgeld)?
        .checked_sub(monthly_interest)?
        .checked_sub(depreciation_monthly)?;
    let tax_yearly = percent_of(
        taxable_cashflow_monthly.checked_mul(dec!(12))?,
        rent.marginal_tax_rate_percent,
    )?;
    let tax_monthly = tax_yearly / dec!(12);

    // 8. Cashflow. The tax effect is always deducted, refund or not.
    let cashflow_before_tax = warm_rent_monthly
        .checked_sub(total_hausgeld)?
        .checked_sub(debt_service_monthly)?;
    let cashflow_after_tax = cashflow_before_tax.checked_sub(tax_monthly.abs())?;
    let is_positive_cashflow = cashflow_after_tax >= Decimal::ZERO;

    // 9. Returns
    let net_rental_yield = net_cold_rent_yearly
        .checked_sub(total_non_allocable_costs.checked_mul(dec!(12))?)?
        .checked_div(price)?
        .checked_mul(dec!(100))?;
    let annual_cashflow = cashflow_after_tax.checked_mul(dec!(12))?;
    let annual_appreciation = percent_of(price, rent.value_increase_percent)?;
    let (return_on_equity, return_on_equity_without_appreciation) =
        if equity_amount > Decimal::ZERO {
            (
                annual_cashflow
                    .checked_add(annual_appreciation)?
                    .checked_div(equity_amount)?
                    .checked_mul(dec!(100))?,
                annual_cashflow
                    .checked_div(equity_amount)?
                    .checked_mul(dec!(100))?,
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

    tracing::trace!(%cashflow_after_tax, %return_on_equity, "property evaluated");

    Some(EvaluationResults {
        price_per_sqm,
        total_incidental_costs_percent,
        total_incidental_costs,
        total_investment,
        total_allocable_costs,
        total_non_allocable_costs,
        total_hausgeld,
        cold_rent_monthly,
        warm_rent_monthly,
        net_cold_rent_yearly,
        gross_rental_yield,
        net_rental_yield,
        cold_rent_factor,
        loan_amount,
        equity_amount,
        equity_ratio_percent,
        monthly_interest,
        monthly_repayment,
        debt_service_monthly,
        building_value,
        depreciation_yearly,
        depreciation_monthly,
        taxable_cashflow_monthly,
        tax_yearly,
        tax_monthly,
        cashflow_before_tax,
        cashflow_after_tax,
        is_positive_cashflow,
        annual_cashflow,
        annual_appreciation,
        return_on_equity,
        return_on_equity_without_appreciation,
    })
}

/// Property evaluation wrapped with warnings and metadata.
pub fn analyse_property(
    state: &PropertyEvaluationState,
) -> CalcResult<ComputationOutput<EvaluationResults>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = evaluate(state).ok_or_else(|| {
        ImmoCalcError::insufficient(
            "evaluation",
            "purchase_price and square_meters must be positive and amounts within range",
        )
    })?;

    if !result.is_positive_cashflow {
        warnings.push(format!(
            "Cash flow after tax is {:.2} EUR per month",
            result.cashflow_after_tax
        ));
    }
    if result.tax_monthly < Decimal::ZERO {
        warnings.push(
            "Taxable result is a loss; the tax effect is deducted from cash flow \
             rather than credited"
                .into(),
        );
    }
    if state.financing.loan_percent > dec!(100) {
        warnings.push(format!(
            "Loan of {}% exceeds the purchase price",
            state.financing.loan_percent
        ));
    }
    if result.equity_amount <= Decimal::ZERO {
        warnings.push("No equity invested: return on equity reported as 0".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Buy-to-let year-one analysis (AfA, Hausgeld, marginal tax)",
        state,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
