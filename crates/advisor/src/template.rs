//! Deterministic reply templates
//!
//! Used when no collaborator is configured, or when it fails after
//! retries. Correctness, not prose style, is the contract here: every
//! figure comes straight from the pre-rounded supporting facts.

use mortgage_agent_core::{ProfileField, UserFinancialProfile};
use mortgage_agent_engine::{Recommendation, Verdict};

/// Format an AED amount with thousands separators and two decimals
pub fn format_aed(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}AED {}.{:02}", sign, grouped, frac)
}

/// Render a recommendation as plain sentences from its supporting facts
pub fn render_recommendation(recommendation: &Recommendation) -> String {
    let facts = &recommendation.facts;
    let affordability = &facts.affordability;
    let amortization = &facts.amortization;

    let mut out = format!(
        "Recommendation: {}. {}",
        recommendation.verdict, recommendation.reason
    );

    out.push_str(&format!(
        " For a {} property you would need {} down plus about {} in one-time \
         costs ({} cash in total), leaving a loan of {}.",
        format_aed(affordability.property_price),
        format_aed(affordability.down_payment),
        format_aed(affordability.upfront_costs),
        format_aed(affordability.total_upfront),
        format_aed(affordability.loan_amount),
    ));

    out.push_str(&format!(
        " The estimated installment is {}/month over {} months at {}% p.a., \
         roughly {}/month all-in once upkeep is included.",
        format_aed(amortization.monthly_installment),
        amortization.tenure_months,
        amortization.annual_rate_percent,
        format_aed(facts.monthly_own_cost),
    ));

    if let Some(pct) = facts.emi_percent_income {
        out.push_str(&format!(
            " That installment is {:.1}% of your monthly income.",
            pct
        ));
    }

    out
}

/// Question asked whenever no recommendation could be produced.
///
/// A missing property price always yields this prompt, never a crash or a
/// default-zero calculation.
pub fn clarifying_prompt(profile: &UserFinancialProfile) -> String {
    if profile.property_price.is_none() {
        "Could you share the property price you have in mind (in AED)? \
         For example: 'a 2,000,000 AED apartment'."
            .to_string()
    } else {
        "Could you tell me a bit more about your plans so I can run the numbers?".to_string()
    }
}

/// Follow-up question after a borderline verdict, asking for the first
/// decision input still missing.
pub fn follow_up_question(profile: &UserFinancialProfile) -> Option<String> {
    let question = match profile.missing_decision_fields().first()? {
        ProfileField::PlanningYears => "How many years do you plan to stay in the property?",
        ProfileField::MonthlyRent => "What do you currently pay in rent each month?",
        ProfileField::MonthlyIncome => "What is your monthly income (AED)?",
        _ => return None,
    };
    Some(question.to_string())
}

/// Whether a borderline verdict should carry a follow-up question
pub fn needs_follow_up(recommendation: &Recommendation) -> bool {
    recommendation.verdict == Verdict::Borderline
}
