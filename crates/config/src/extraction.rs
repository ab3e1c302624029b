//! Keyword-to-field extraction tables
//!
//! The numeric extractor is a best-effort classifier driven by this table
//! rather than hard-coded keywords, since the policy wording and language
//! will evolve. Tables load from YAML; the defaults reproduce the keyword
//! sets the advisor ships with.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::constants::extraction;
use crate::ConfigError;

/// Which amount candidate a field takes when its keywords match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountPick {
    /// First numeric match in textual order
    First,
    /// Largest numeric match (property prices dominate in magnitude)
    Largest,
    /// First match under the plausibility ceiling, else first raw match
    BelowCeiling,
}

/// Extraction rule for one profile field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Keywords whose presence assigns a number to this field
    pub keywords: Vec<String>,
    /// Candidate selection strategy
    pub pick: AmountPick,
}

impl FieldRule {
    fn new(keywords: &[&str], pick: AmountPick) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            pick,
        }
    }

    /// True if any keyword occurs in the (lowercased) text
    pub fn matches(&self, lower_text: &str) -> bool {
        self.keywords.iter().any(|k| lower_text.contains(k.as_str()))
    }
}

/// Keyword-to-field table plus extraction bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Rules keyed by profile field name
    #[serde(default)]
    pub fields: HashMap<String, FieldRule>,
    /// Monthly rents above this are assumed mis-tagged (AED/month)
    #[serde(default = "default_rent_ceiling")]
    pub rent_ceiling: f64,
}

fn default_rent_ceiling() -> f64 {
    extraction::RENT_PLAUSIBILITY_CEILING
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let mut fields = HashMap::new();
        fields.insert(
            "monthly_income".to_string(),
            FieldRule::new(&["income", "salary", "earn"], AmountPick::First),
        );
        fields.insert(
            "property_price".to_string(),
            FieldRule::new(
                &["price", "aed", "apartment", "property", "buy", "flat"],
                AmountPick::Largest,
            ),
        );
        fields.insert(
            "monthly_rent".to_string(),
            FieldRule::new(&["rent"], AmountPick::BelowCeiling),
        );
        fields.insert(
            "down_payment".to_string(),
            FieldRule::new(&["down payment", "downpayment", "deposit"], AmountPick::First),
        );
        fields.insert(
            "planning_years".to_string(),
            FieldRule::new(&["year", "years", "stay"], AmountPick::First),
        );

        Self {
            fields,
            rent_ceiling: default_rent_ceiling(),
        }
    }
}

impl ExtractionConfig {
    /// Load a table from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|_| ConfigError::FileNotFound(path.as_ref().display().to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn rule(&self, field_name: &str) -> Option<&FieldRule> {
        self.fields.get(field_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_all_fields() {
        let config = ExtractionConfig::default();
        for field in [
            "monthly_income",
            "property_price",
            "monthly_rent",
            "down_payment",
            "planning_years",
        ] {
            assert!(config.rule(field).is_some(), "missing rule for {}", field);
        }
        assert_eq!(config.rent_ceiling, 100_000.0);
    }

    #[test]
    fn test_price_rule_picks_largest() {
        let config = ExtractionConfig::default();
        assert_eq!(config.rule("property_price").unwrap().pick, AmountPick::Largest);
    }

    #[test]
    fn test_rule_keyword_matching() {
        let config = ExtractionConfig::default();
        let rule = config.rule("monthly_income").unwrap();
        assert!(rule.matches("my salary is 18000"));
        assert!(!rule.matches("a 2000000 aed flat"));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = r#"
fields:
  monthly_rent:
    keywords: ["rent", "renting"]
    pick: below_ceiling
rent_ceiling: 50000
"#;
        let config: ExtractionConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.rent_ceiling, 50_000.0);
        let rule = config.rule("monthly_rent").unwrap();
        assert_eq!(rule.pick, AmountPick::BelowCeiling);
        assert!(rule.matches("renting in dubai"));
    }
}
