//! Deterministic mortgage decision engine
//!
//! The computational core of the advisor: pure functions over immutable
//! numeric inputs. No I/O, no locks, nothing suspends; each conversation
//! turn flows through [`MortgageEngine::evaluate`] and produces a fresh
//! profile snapshot plus, once a property price is known, a
//! [`Recommendation`].
//!
//! Failure modes are deterministic (`InvalidInput`) and must never be
//! retried; transient failures exist only at the LLM boundary, which lives
//! in a separate crate.

pub mod affordability;
pub mod amortization;
pub mod decision;
pub mod evaluate;
pub mod extractor;

pub use affordability::{affordability, affordability_with_down_payment, AffordabilityResult};
pub use amortization::{monthly_installment, AmortizationResult};
pub use decision::{decide, Recommendation, SupportingFacts, Verdict};
pub use evaluate::{Evaluation, MortgageEngine};
pub use extractor::FieldExtractor;

/// Round to currency minor-unit precision. Applied once, at the output
/// boundary of each calculator, never on intermediate values.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn test_round2() {
        assert_eq!(round2(8893.319647), 8893.32);
        assert_eq!(round2(140_000.0), 140_000.0);
        assert_eq!(round2(0.005), 0.01);
    }
}
