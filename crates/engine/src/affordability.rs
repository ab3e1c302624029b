//! Affordability calculation
//!
//! Splits a property price into down payment, loan principal, and one-time
//! upfront costs according to the lending policy. Pure function of its
//! inputs; recomputed in full on every request.

use serde::{Deserialize, Serialize};

use mortgage_agent_config::LendingPolicy;
use mortgage_agent_core::{Error, Result};

use crate::round2;

/// Derived affordability facts, rounded to 2 decimals at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub property_price: f64,
    pub down_payment: f64,
    pub loan_amount: f64,
    pub upfront_costs: f64,
    pub total_upfront: f64,
}

/// Affordability with the policy-minimum down payment
pub fn affordability(property_price: f64, policy: &LendingPolicy) -> Result<AffordabilityResult> {
    affordability_with_down_payment(property_price, None, policy)
}

/// Affordability honoring a user-stated down payment.
///
/// The loan is derived from the actual down payment when known (raised to
/// the policy minimum if understated) and capped by the loan-to-value
/// limit, so `min_down_payment_ratio` and `max_loan_to_value` stay
/// independently configurable.
pub fn affordability_with_down_payment(
    property_price: f64,
    stated_down_payment: Option<f64>,
    policy: &LendingPolicy,
) -> Result<AffordabilityResult> {
    if !property_price.is_finite() || property_price <= 0.0 {
        return Err(Error::invalid_input("property_price must be > 0"));
    }
    if let Some(down) = stated_down_payment {
        if !down.is_finite() || down < 0.0 {
            return Err(Error::invalid_input("down_payment must be >= 0"));
        }
    }

    let minimum_down = property_price * policy.min_down_payment_ratio;
    let down_payment = stated_down_payment
        .map(|d| d.max(minimum_down))
        .unwrap_or(minimum_down)
        .min(property_price);

    let loan_amount = (property_price - down_payment)
        .min(property_price * policy.max_loan_to_value)
        .max(0.0);
    let upfront_costs = property_price * policy.upfront_cost_ratio;

    Ok(AffordabilityResult {
        property_price: round2(property_price),
        down_payment: round2(down_payment),
        loan_amount: round2(loan_amount),
        upfront_costs: round2(upfront_costs),
        total_upfront: round2(down_payment + upfront_costs),
    })
}
