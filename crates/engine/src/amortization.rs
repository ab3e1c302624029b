//! Equated monthly installment (EMI) calculation
//!
//! Standard amortizing-loan formula:
//!
//! EMI = P × r × (1 + r)^n / [(1 + r)^n - 1]
//!
//! where P is the principal, r the monthly rate (annual / 12 / 100) and n
//! the tenure in months. Double-precision throughout; only the three
//! output fields are rounded, at the boundary.

use serde::{Deserialize, Serialize};

use mortgage_agent_core::{Error, Result};

use crate::round2;

/// Derived amortization facts, rounded to 2 decimals at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_installment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    /// The rate the installment was computed with (percent, as given)
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
}

/// Compute the fixed monthly installment for a loan.
///
/// `tenure_years == 0` and negative inputs are precondition violations,
/// surfaced immediately; they are deterministic and must not be retried.
pub fn monthly_installment(
    principal: f64,
    annual_rate_percent: f64,
    tenure_years: u32,
) -> Result<AmortizationResult> {
    if tenure_years == 0 {
        return Err(Error::invalid_input("tenure_years must be > 0"));
    }
    if !principal.is_finite() || principal < 0.0 {
        return Err(Error::invalid_input("principal must be >= 0"));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(Error::invalid_input("annual_rate_percent must be >= 0"));
    }

    let tenure_months = tenure_years * 12;

    // Guarded special case: the general formula is well-defined here but
    // would introduce floating-point noise around zero.
    if principal == 0.0 {
        return Ok(AmortizationResult {
            monthly_installment: 0.0,
            total_payment: 0.0,
            total_interest: 0.0,
            annual_rate_percent,
            tenure_months,
        });
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let n = tenure_months as f64;

    let installment = if monthly_rate == 0.0 {
        // Zero-interest degenerate case; the general formula divides by zero
        principal / n
    } else {
        let growth = (1.0 + monthly_rate).powf(n);
        principal * monthly_rate * growth / (growth - 1.0)
    };

    let total_payment = installment * n;

    Ok(AmortizationResult {
        monthly_installment: round2(installment),
        total_payment: round2(total_payment),
        total_interest: round2(total_payment - principal),
        annual_rate_percent,
        tenure_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rate_and_tenure() {
        // 1.6M at 4.5% over 25 years
        let result = monthly_installment(1_600_000.0, 4.5, 25).unwrap();

        assert_eq!(result.monthly_installment, 8_893.32);
        assert_eq!(result.total_payment, 2_667_995.89);
        assert_eq!(result.total_interest, 1_067_995.89);
        assert_eq!(result.tenure_months, 300);
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let result = monthly_installment(100_000.0, 0.0, 1).unwrap();

        assert_eq!(result.monthly_installment, 8_333.33);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_zero_principal_short_circuits() {
        let result = monthly_installment(0.0, 4.5, 25).unwrap();

        assert_eq!(result.monthly_installment, 0.0);
        assert_eq!(result.total_payment, 0.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_zero_tenure_rejected() {
        let err = monthly_installment(100_000.0, 4.5, 0).unwrap_err();
        assert!(err.to_string().contains("tenure_years"));
    }

    #[test]
    fn test_negative_principal_rejected() {
        assert!(monthly_installment(-1.0, 4.5, 25).is_err());
    }

    #[test]
    fn test_interest_non_negative_and_installment_positive() {
        for (principal, rate, years) in [
            (1_000.0, 0.0, 5),
            (500_000.0, 3.99, 10),
            (1_600_000.0, 4.5, 25),
            (10_000_000.0, 12.0, 20),
        ] {
            let result = monthly_installment(principal, rate, years).unwrap();
            assert!(result.monthly_installment > 0.0);
            assert!(result.total_interest >= 0.0);
        }
    }

    #[test]
    fn test_idempotent() {
        let a = monthly_installment(1_600_000.0, 4.5, 25).unwrap();
        let b = monthly_installment(1_600_000.0, 4.5, 25).unwrap();
        assert_eq!(a, b);
    }
}
