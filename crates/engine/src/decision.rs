//! Buy-vs-rent decision heuristic
//!
//! Combines stay duration, the computed installment, and optional rent and
//! income into a verdict. The tie-break ladder runs in a fixed order and
//! the first matching rule wins; that ordering is a deliberate design
//! choice resolving an otherwise ambiguous multi-factor decision. This is
//! a heuristic, not a guaranteed-optimal recommendation.

use serde::{Deserialize, Serialize};

use mortgage_agent_config::{DecisionThresholds, LendingPolicy};
use mortgage_agent_core::{Error, Result, UserFinancialProfile};

use crate::affordability::{affordability_with_down_payment, AffordabilityResult};
use crate::amortization::{monthly_installment, AmortizationResult};
use crate::round2;

/// Recommendation verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Buy,
    Rent,
    /// Insufficient signal to prefer buy or rent
    Borderline,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Buy => write!(f, "Buy"),
            Verdict::Rent => write!(f, "Rent"),
            Verdict::Borderline => write!(f, "Borderline"),
        }
    }
}

/// The numeric facts backing a recommendation, pre-rounded to 2 decimals.
///
/// This is the structured payload handed to the text-generation
/// collaborator; its numbers are authoritative and must be presented
/// without recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportingFacts {
    pub affordability: AffordabilityResult,
    pub amortization: AmortizationResult,
    /// Flat-rate upkeep estimate (policy assumption, AED/month)
    pub monthly_maintenance: f64,
    /// Installment plus maintenance (AED/month)
    pub monthly_own_cost: f64,
    /// Installment as a percentage of monthly income, when income is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_percent_income: Option<f64>,
}

/// A buy/rent/borderline recommendation with its reasoning and facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: Verdict,
    pub reason: String,
    pub facts: SupportingFacts,
}

/// Run the decision ladder over an accumulated profile.
///
/// Requires `property_price`; everything else is optional and feeds the
/// fallback rungs.
pub fn decide(
    profile: &UserFinancialProfile,
    policy: &LendingPolicy,
    thresholds: &DecisionThresholds,
) -> Result<Recommendation> {
    let price = profile
        .property_price
        .ok_or_else(|| Error::invalid_input("property_price is required"))?;

    let affordability = affordability_with_down_payment(price, profile.down_payment, policy)?;
    let amortization = monthly_installment(
        affordability.loan_amount,
        policy.standard_annual_rate_percent,
        policy.max_tenure_years,
    )?;

    let installment = amortization.monthly_installment;
    let maintenance = price * policy.annual_maintenance_ratio / 12.0;
    let own_cost = installment + maintenance;
    let emi_percent_income = profile
        .monthly_income
        .filter(|income| *income > 0.0)
        .map(|income| installment / income * 100.0);

    let (verdict, reason) = match (
        profile.planning_years,
        profile.monthly_rent.filter(|rent| *rent > 0.0),
        emi_percent_income,
    ) {
        (Some(years), _, _) if years < thresholds.short_stay_years => (
            Verdict::Rent,
            format!(
                "A stay of {} years is under the {}-year mark; the upfront and \
                 transaction costs would not be recovered before moving out.",
                years, thresholds.short_stay_years
            ),
        ),
        (Some(years), _, _) if years > thresholds.long_stay_years => (
            Verdict::Buy,
            format!(
                "A stay of {} years is beyond the {}-year mark; long-term equity \
                 buildup dominates the transaction costs.",
                years, thresholds.long_stay_years
            ),
        ),
        (_, Some(rent), _) => {
            if own_cost < rent {
                (
                    Verdict::Buy,
                    format!(
                        "Owning costs about AED {:.2}/month (installment plus upkeep), \
                         below your current rent of AED {:.2}.",
                        own_cost, rent
                    ),
                )
            } else if own_cost > rent * (1.0 + thresholds.rent_tolerance_ratio) {
                (
                    Verdict::Rent,
                    format!(
                        "Owning costs about AED {:.2}/month, more than {:.0}% above \
                         your current rent of AED {:.2}; renting stays cheaper.",
                        own_cost,
                        thresholds.rent_tolerance_ratio * 100.0,
                        rent
                    ),
                )
            } else {
                (
                    Verdict::Buy,
                    format!(
                        "Owning costs about AED {:.2}/month, within {:.0}% of your \
                         rent of AED {:.2}; the small excess is tolerable against \
                         equity buildup.",
                        own_cost,
                        thresholds.rent_tolerance_ratio * 100.0,
                        rent
                    ),
                )
            }
        }
        (_, None, Some(pct)) => {
            if pct <= thresholds.max_emi_income_percent {
                (
                    Verdict::Buy,
                    format!(
                        "The installment is {:.1}% of your monthly income, within \
                         the {:.0}% affordability test.",
                        pct, thresholds.max_emi_income_percent
                    ),
                )
            } else {
                (
                    Verdict::Rent,
                    format!(
                        "The installment would consume {:.1}% of your monthly \
                         income, above the {:.0}% affordability cutoff.",
                        pct, thresholds.max_emi_income_percent
                    ),
                )
            }
        }
        _ => (
            Verdict::Borderline,
            "Not enough information to decide; a planned stay duration, your \
             current rent, or your monthly income would settle it."
                .to_string(),
        ),
    };

    Ok(Recommendation {
        verdict,
        reason,
        facts: SupportingFacts {
            affordability,
            amortization,
            monthly_maintenance: round2(maintenance),
            monthly_own_cost: round2(own_cost),
            emi_percent_income: emi_percent_income.map(round2),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(price: f64) -> UserFinancialProfile {
        UserFinancialProfile {
            property_price: Some(price),
            ..Default::default()
        }
    }

    fn run(profile: &UserFinancialProfile) -> Recommendation {
        decide(
            profile,
            &LendingPolicy::default(),
            &DecisionThresholds::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_scenario_a_borderline_without_signals() {
        let rec = run(&profile(2_000_000.0));

        assert_eq!(rec.verdict, Verdict::Borderline);
        assert_eq!(rec.facts.affordability.down_payment, 400_000.0);
        assert_eq!(rec.facts.affordability.loan_amount, 1_600_000.0);
        assert_eq!(rec.facts.affordability.upfront_costs, 140_000.0);
        assert_eq!(rec.facts.affordability.total_upfront, 540_000.0);
        assert_eq!(rec.facts.amortization.monthly_installment, 8_893.32);
        assert_eq!(rec.facts.emi_percent_income, None);
    }

    #[test]
    fn test_scenario_b_short_stay_rents() {
        let mut p = profile(2_000_000.0);
        p.planning_years = Some(2);

        assert_eq!(run(&p).verdict, Verdict::Rent);
    }

    #[test]
    fn test_scenario_c_long_stay_buys() {
        let mut p = profile(2_000_000.0);
        p.planning_years = Some(6);

        assert_eq!(run(&p).verdict, Verdict::Buy);
    }

    #[test]
    fn test_scenario_d_rent_within_tolerance_buys() {
        let mut p = profile(2_000_000.0);
        p.planning_years = Some(4);
        p.monthly_rent = Some(9_000.0);

        let rec = run(&p);
        // Own cost 9,309.99 exceeds rent by ~3.4%, inside the 10% band
        assert_eq!(rec.facts.monthly_own_cost, 9_309.99);
        assert_eq!(rec.facts.monthly_maintenance, 416.67);
        assert_eq!(rec.verdict, Verdict::Buy);
    }

    #[test]
    fn test_rent_exceeded_beyond_tolerance_rents() {
        let mut p = profile(2_000_000.0);
        p.planning_years = Some(4);
        p.monthly_rent = Some(8_000.0);

        // Own cost 9,309.99 is ~16% above 8,000
        assert_eq!(run(&p).verdict, Verdict::Rent);
    }

    #[test]
    fn test_cheaper_ownership_buys() {
        let mut p = profile(2_000_000.0);
        p.monthly_rent = Some(12_000.0);

        assert_eq!(run(&p).verdict, Verdict::Buy);
    }

    #[test]
    fn test_scenario_e_income_burden_rents() {
        let mut p = profile(2_000_000.0);
        p.planning_years = Some(4);
        p.monthly_income = Some(20_000.0);

        let rec = run(&p);
        assert_eq!(rec.facts.emi_percent_income, Some(44.47));
        assert_eq!(rec.verdict, Verdict::Rent);
    }

    #[test]
    fn test_income_within_cutoff_buys() {
        let mut p = profile(2_000_000.0);
        p.monthly_income = Some(30_000.0);

        let rec = run(&p);
        // 8,893.32 / 30,000 = 29.6%
        assert_eq!(rec.verdict, Verdict::Buy);
    }

    #[test]
    fn test_ladder_short_stay_short_circuits_everything() {
        let p = UserFinancialProfile {
            property_price: Some(2_000_000.0),
            planning_years: Some(2),
            monthly_rent: Some(1.0),
            monthly_income: Some(1_000_000.0),
            ..Default::default()
        };

        // Rule 1 wins regardless of rent and income
        assert_eq!(run(&p).verdict, Verdict::Rent);
    }

    #[test]
    fn test_income_still_reported_when_ladder_stops_earlier() {
        let p = UserFinancialProfile {
            property_price: Some(2_000_000.0),
            planning_years: Some(6),
            monthly_income: Some(20_000.0),
            ..Default::default()
        };

        let rec = run(&p);
        assert_eq!(rec.verdict, Verdict::Buy);
        assert_eq!(rec.facts.emi_percent_income, Some(44.47));
    }

    #[test]
    fn test_missing_price_rejected() {
        let result = decide(
            &UserFinancialProfile::default(),
            &LendingPolicy::default(),
            &DecisionThresholds::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_facts_serialize_without_absent_income_ratio() {
        let rec = run(&profile(2_000_000.0));
        let json = serde_json::to_value(&rec.facts).unwrap();

        assert!(json.get("emi_percent_income").is_none());
        assert_eq!(
            json["affordability"]["loan_amount"],
            serde_json::json!(1_600_000.0)
        );
    }
}
