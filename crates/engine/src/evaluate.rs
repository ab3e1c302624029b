//! The engine's single inbound boundary
//!
//! `evaluate` takes one raw user message and the prior profile, returns the
//! updated profile and, when a property price is known, a recommendation.
//! The profile is passed in and handed back explicitly; the engine holds no
//! session state of its own, so concurrent conversations are isolated by
//! construction.

use mortgage_agent_config::{DecisionThresholds, ExtractionConfig, LendingPolicy};
use mortgage_agent_core::{Error, Result, UserFinancialProfile};

use crate::decision::{decide, Recommendation};
use crate::extractor::FieldExtractor;

/// Outcome of one conversation turn
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Profile after merging this turn's extractions
    pub profile: UserFinancialProfile,
    /// Absent until the profile carries a property price; the caller is
    /// expected to prompt for one.
    pub recommendation: Option<Recommendation>,
}

/// Extractor plus policy, bundled for per-turn evaluation
pub struct MortgageEngine {
    extractor: FieldExtractor,
    policy: LendingPolicy,
    thresholds: DecisionThresholds,
}

impl MortgageEngine {
    /// Engine with default policy and extraction tables
    pub fn new() -> Self {
        Self {
            extractor: FieldExtractor::default(),
            policy: LendingPolicy::default(),
            thresholds: DecisionThresholds::default(),
        }
    }

    /// Engine with overridden tables and policy, validated up front
    pub fn with_config(
        extraction: ExtractionConfig,
        policy: LendingPolicy,
        thresholds: DecisionThresholds,
    ) -> Result<Self> {
        policy
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;
        thresholds
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            extractor: FieldExtractor::new(extraction),
            policy,
            thresholds,
        })
    }

    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    pub fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    /// Process one user message against the accumulated profile.
    ///
    /// Never fails: extraction leaves unmatched fields unset, and a profile
    /// without a price simply yields no recommendation.
    pub fn evaluate(&self, raw_text: &str, prior: &UserFinancialProfile) -> Evaluation {
        let update = self.extractor.extract(raw_text);
        let profile = prior.clone().merged(&update);

        let recommendation = if profile.is_ready_for_calculation() {
            match decide(&profile, &self.policy, &self.thresholds) {
                Ok(rec) => Some(rec),
                Err(e) => {
                    tracing::warn!(error = %e, "recommendation unavailable for profile");
                    None
                }
            }
        } else {
            None
        };

        Evaluation {
            profile,
            recommendation,
        }
    }
}

impl Default for MortgageEngine {
    fn default() -> Self {
        Self::new()
    }
}
