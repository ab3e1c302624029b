//! Typed policy structs with defaults from [`crate::constants`]
//!
//! The calculators take these by reference so the ratios and thresholds can
//! be overridden per deployment without touching the engine.

use serde::{Deserialize, Serialize};

use crate::constants::{decision, financing, ownership};
use crate::ConfigError;

/// Lending policy: financing ratios, rate, and tenure.
///
/// `max_loan_to_value` and `min_down_payment_ratio` are independent fields:
/// with the defaults they are complements, but a user paying extra down
/// payment decouples them, and the loan is then derived from the actual
/// down payment capped by the LTV limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPolicy {
    pub max_loan_to_value: f64,
    pub min_down_payment_ratio: f64,
    pub upfront_cost_ratio: f64,
    pub standard_annual_rate_percent: f64,
    pub max_tenure_years: u32,
    pub annual_maintenance_ratio: f64,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            max_loan_to_value: financing::MAX_LOAN_TO_VALUE,
            min_down_payment_ratio: financing::MIN_DOWN_PAYMENT_RATIO,
            upfront_cost_ratio: financing::UPFRONT_COST_RATIO,
            standard_annual_rate_percent: financing::STANDARD_ANNUAL_RATE_PERCENT,
            max_tenure_years: financing::MAX_TENURE_YEARS,
            annual_maintenance_ratio: ownership::ANNUAL_MAINTENANCE_RATIO,
        }
    }
}

impl LendingPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_loan_to_value", self.max_loan_to_value),
            ("min_down_payment_ratio", self.min_down_payment_ratio),
            ("upfront_cost_ratio", self.upfront_cost_ratio),
            ("annual_maintenance_ratio", self.annual_maintenance_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("must be within [0, 1], got {}", value),
                });
            }
        }
        if self.standard_annual_rate_percent < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "standard_annual_rate_percent".to_string(),
                message: "must be >= 0".to_string(),
            });
        }
        if self.max_tenure_years == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_tenure_years".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Thresholds for the buy-vs-rent decision ladder.
///
/// The rent tolerance band and the income cutoff are policy choices with no
/// stated derivation; treat them as tunables, not truths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionThresholds {
    pub short_stay_years: u32,
    pub long_stay_years: u32,
    pub rent_tolerance_ratio: f64,
    pub max_emi_income_percent: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            short_stay_years: decision::SHORT_STAY_THRESHOLD_YEARS,
            long_stay_years: decision::LONG_STAY_THRESHOLD_YEARS,
            rent_tolerance_ratio: decision::RENT_TOLERANCE_RATIO,
            max_emi_income_percent: decision::MAX_EMI_INCOME_PERCENT,
        }
    }
}

impl DecisionThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_stay_years >= self.long_stay_years {
            return Err(ConfigError::InvalidValue {
                field: "short_stay_years".to_string(),
                message: format!(
                    "must be below long_stay_years ({} >= {})",
                    self.short_stay_years, self.long_stay_years
                ),
            });
        }
        if self.rent_tolerance_ratio < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "rent_tolerance_ratio".to_string(),
                message: "must be >= 0".to_string(),
            });
        }
        if self.max_emi_income_percent <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "max_emi_income_percent".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        LendingPolicy::default().validate().unwrap();
        DecisionThresholds::default().validate().unwrap();
    }

    #[test]
    fn test_ltv_out_of_range_rejected() {
        let policy = LendingPolicy {
            max_loan_to_value: 1.2,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_zero_tenure_rejected() {
        let policy = LendingPolicy {
            max_tenure_years: 0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_inverted_stay_thresholds_rejected() {
        let thresholds = DecisionThresholds {
            short_stay_years: 6,
            long_stay_years: 5,
            ..Default::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_policy_deserializes_partial_overrides() {
        let yaml = "max_loan_to_value: 0.75\n";
        let policy: LendingPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.max_loan_to_value, 0.75);
        // Untouched fields keep their defaults
        assert_eq!(policy.max_tenure_years, 25);
    }
}
