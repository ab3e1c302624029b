//! Per-session financial profile
//!
//! `UserFinancialProfile` accumulates the facts extracted from one
//! conversation. It is the only mutable entity in the system: each turn
//! produces a `ProfileUpdate` that is merged last-write-wins, and everything
//! derived from the profile is recomputed from scratch.

use serde::{Deserialize, Serialize};

/// Fields a single extraction pass may update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    MonthlyIncome,
    PropertyPrice,
    MonthlyRent,
    DownPayment,
    PlanningYears,
}

impl ProfileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::MonthlyIncome => "monthly_income",
            ProfileField::PropertyPrice => "property_price",
            ProfileField::MonthlyRent => "monthly_rent",
            ProfileField::DownPayment => "down_payment",
            ProfileField::PlanningYears => "planning_years",
        }
    }

    /// Resolve a configured field name to a profile field
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "monthly_income" => Some(ProfileField::MonthlyIncome),
            "property_price" => Some(ProfileField::PropertyPrice),
            "monthly_rent" => Some(ProfileField::MonthlyRent),
            "down_payment" => Some(ProfileField::DownPayment),
            "planning_years" => Some(ProfileField::PlanningYears),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partial field updates produced by one extraction pass.
///
/// Absence means "field not updated this turn", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub monthly_income: Option<f64>,
    pub property_price: Option<f64>,
    pub monthly_rent: Option<f64>,
    pub down_payment: Option<f64>,
    pub planning_years: Option<u32>,
}

impl ProfileUpdate {
    /// True when the pass extracted nothing
    pub fn is_empty(&self) -> bool {
        self.monthly_income.is_none()
            && self.property_price.is_none()
            && self.monthly_rent.is_none()
            && self.down_payment.is_none()
            && self.planning_years.is_none()
    }

    pub fn set_amount(&mut self, field: ProfileField, value: f64) {
        match field {
            ProfileField::MonthlyIncome => self.monthly_income = Some(value),
            ProfileField::PropertyPrice => self.property_price = Some(value),
            ProfileField::MonthlyRent => self.monthly_rent = Some(value),
            ProfileField::DownPayment => self.down_payment = Some(value),
            ProfileField::PlanningYears => self.planning_years = Some(value as u32),
        }
    }
}

/// Accumulated facts about one conversation session.
///
/// Created empty at session start, mutated by each inbound message,
/// discarded when the session ends. Amounts are AED throughout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserFinancialProfile {
    /// Monthly income in AED
    pub monthly_income: Option<f64>,
    /// Target property price in AED
    pub property_price: Option<f64>,
    /// Current monthly rent in AED
    pub monthly_rent: Option<f64>,
    /// Stated down payment in AED (beyond-minimum payments change the loan)
    pub down_payment: Option<f64>,
    /// How many years the user plans to stay
    pub planning_years: Option<u32>,
}

impl UserFinancialProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an extraction pass into the profile, last write wins per field
    pub fn merge(&mut self, update: &ProfileUpdate) {
        if let Some(income) = update.monthly_income {
            self.monthly_income = Some(income);
        }
        if let Some(price) = update.property_price {
            self.property_price = Some(price);
        }
        if let Some(rent) = update.monthly_rent {
            self.monthly_rent = Some(rent);
        }
        if let Some(down) = update.down_payment {
            self.down_payment = Some(down);
        }
        if let Some(years) = update.planning_years {
            self.planning_years = Some(years);
        }
    }

    /// Consuming variant of [`merge`](Self::merge)
    pub fn merged(mut self, update: &ProfileUpdate) -> Self {
        self.merge(update);
        self
    }

    /// A property price is the only hard requirement for a recommendation;
    /// all other fields feed the decision ladder's fallbacks.
    pub fn is_ready_for_calculation(&self) -> bool {
        self.property_price.is_some()
    }

    /// Decision-ladder inputs still missing, in ladder order.
    ///
    /// Used to phrase follow-up questions after a `Borderline` verdict.
    pub fn missing_decision_fields(&self) -> Vec<ProfileField> {
        let mut missing = Vec::new();
        if self.planning_years.is_none() {
            missing.push(ProfileField::PlanningYears);
        }
        if self.monthly_rent.is_none() {
            missing.push(ProfileField::MonthlyRent);
        }
        if self.monthly_income.is_none() {
            missing.push(ProfileField::MonthlyIncome);
        }
        missing
    }

    /// Render the known facts for LLM prompt context
    pub fn to_context_string(&self) -> String {
        let mut parts = Vec::new();

        if let Some(income) = self.monthly_income {
            parts.push(format!("Monthly income: AED {:.0}", income));
        }
        if let Some(price) = self.property_price {
            parts.push(format!("Property price: AED {:.0}", price));
        }
        if let Some(rent) = self.monthly_rent {
            parts.push(format!("Current rent: AED {:.0}/month", rent));
        }
        if let Some(down) = self.down_payment {
            parts.push(format!("Stated down payment: AED {:.0}", down));
        }
        if let Some(years) = self.planning_years {
            parts.push(format!("Planned stay: {} years", years));
        }

        if parts.is_empty() {
            "No information collected yet.".to_string()
        } else {
            parts.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_not_ready() {
        let profile = UserFinancialProfile::new();
        assert!(!profile.is_ready_for_calculation());
        assert_eq!(profile.to_context_string(), "No information collected yet.");
    }

    #[test]
    fn test_merge_sets_fields() {
        let mut profile = UserFinancialProfile::new();
        let update = ProfileUpdate {
            property_price: Some(2_000_000.0),
            planning_years: Some(4),
            ..Default::default()
        };

        profile.merge(&update);

        assert_eq!(profile.property_price, Some(2_000_000.0));
        assert_eq!(profile.planning_years, Some(4));
        assert!(profile.is_ready_for_calculation());
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut profile = UserFinancialProfile::new();
        profile.merge(&ProfileUpdate {
            monthly_rent: Some(8_000.0),
            ..Default::default()
        });
        profile.merge(&ProfileUpdate {
            monthly_rent: Some(9_500.0),
            ..Default::default()
        });

        assert_eq!(profile.monthly_rent, Some(9_500.0));
    }

    #[test]
    fn test_merge_absent_fields_untouched() {
        let mut profile = UserFinancialProfile::new();
        profile.merge(&ProfileUpdate {
            monthly_income: Some(18_000.0),
            ..Default::default()
        });
        profile.merge(&ProfileUpdate::default());

        assert_eq!(profile.monthly_income, Some(18_000.0));
    }

    #[test]
    fn test_missing_decision_fields_order() {
        let profile = UserFinancialProfile {
            property_price: Some(1_500_000.0),
            monthly_rent: Some(7_000.0),
            ..Default::default()
        };

        assert_eq!(
            profile.missing_decision_fields(),
            vec![ProfileField::PlanningYears, ProfileField::MonthlyIncome]
        );
    }

    #[test]
    fn test_context_string_contains_facts() {
        let profile = UserFinancialProfile {
            property_price: Some(2_000_000.0),
            planning_years: Some(6),
            ..Default::default()
        };

        let context = profile.to_context_string();
        assert!(context.contains("AED 2000000"));
        assert!(context.contains("6 years"));
    }

    #[test]
    fn test_field_name_roundtrip() {
        for field in [
            ProfileField::MonthlyIncome,
            ProfileField::PropertyPrice,
            ProfileField::MonthlyRent,
            ProfileField::DownPayment,
            ProfileField::PlanningYears,
        ] {
            assert_eq!(ProfileField::from_name(field.as_str()), Some(field));
        }
        assert_eq!(ProfileField::from_name("unknown"), None);
    }
}
