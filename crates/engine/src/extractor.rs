//! Numeric field extraction from free-form chat messages
//!
//! Rule-based extraction: regex patterns pull candidate amounts and a stay
//! duration out of the text, and the configurable keyword table decides
//! which candidate lands in which profile field. This is a best-effort
//! classifier, not a parser with a formal grammar; when nothing matches,
//! the field is simply left unset.

use once_cell::sync::Lazy;
use regex::Regex;

use mortgage_agent_config::{AmountPick, ExtractionConfig};
use mortgage_agent_core::{ProfileField, ProfileUpdate};

/// Multiplier attached to an amount suffix
#[derive(Debug, Clone, Copy)]
enum AmountMultiplier {
    Unit,
    Thousand, // "250k", "250 thousand"
    Million,  // "2m", "2 million"
}

impl AmountMultiplier {
    fn value(&self) -> f64 {
        match self {
            AmountMultiplier::Unit => 1.0,
            AmountMultiplier::Thousand => 1_000.0,
            AmountMultiplier::Million => 1_000_000.0,
        }
    }
}

static MILLION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*(?:m|mn|million)\b").unwrap());
static THOUSAND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*(?:k|thousand)\b").unwrap());
static PLAIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap());
static YEARS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:years?|yrs?)\b").unwrap());

/// Extracts profile field updates from one user message
pub struct FieldExtractor {
    config: ExtractionConfig,
}

impl FieldExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract all matching fields from a message.
    ///
    /// Absence of a match is not an error; the corresponding field is left
    /// unset and the caller asks the user instead of assuming zero.
    pub fn extract(&self, text: &str) -> ProfileUpdate {
        let lower = text.to_lowercase();
        let amounts = self.amount_candidates(&lower);
        let years = Self::extract_years(&lower);

        let mut update = ProfileUpdate::default();

        for (name, rule) in &self.config.fields {
            let Some(field) = ProfileField::from_name(name) else {
                tracing::debug!(field = %name, "unknown field in extraction table, skipped");
                continue;
            };

            if !rule.matches(&lower) {
                continue;
            }

            if field == ProfileField::PlanningYears {
                // Keywords alone are not enough; an explicit "<N> year" span
                // must also be present.
                if let Some(y) = years {
                    update.planning_years = Some(y);
                }
                continue;
            }

            let picked = match rule.pick {
                AmountPick::First => amounts.first().copied(),
                AmountPick::Largest => amounts.iter().copied().reduce(f64::max),
                AmountPick::BelowCeiling => amounts
                    .iter()
                    .copied()
                    .find(|a| *a <= self.config.rent_ceiling)
                    .or_else(|| amounts.first().copied()),
            };

            if let Some(value) = picked {
                update.set_amount(field, value);
            }
        }

        if !update.is_empty() {
            tracing::debug!(?update, "fields extracted");
        }
        update
    }

    /// Collect amount candidates in textual order.
    ///
    /// Suffixed forms ("2m", "250k") are matched first and their spans
    /// cover the plain-number pass, so "2.5m" never also yields 2.5.
    /// Spans matched by the "<N> year(s)" pattern are excluded outright, so
    /// a stay duration is never mistaken for a monetary amount.
    fn amount_candidates(&self, lower: &str) -> Vec<f64> {
        let mut covered: Vec<(usize, usize)> = YEARS_PATTERN
            .find_iter(lower)
            .map(|m| (m.start(), m.end()))
            .collect();
        let mut found: Vec<(usize, f64)> = Vec::new();

        let passes: [(&Regex, AmountMultiplier); 3] = [
            (&MILLION_PATTERN, AmountMultiplier::Million),
            (&THOUSAND_PATTERN, AmountMultiplier::Thousand),
            (&PLAIN_PATTERN, AmountMultiplier::Unit),
        ];

        for (pattern, multiplier) in passes {
            for caps in pattern.captures_iter(lower) {
                let Some(whole) = caps.get(0) else { continue };
                if covered
                    .iter()
                    .any(|&(s, e)| whole.start() < e && whole.end() > s)
                {
                    continue;
                }

                let digits = caps.get(1).map(|m| m.as_str()).unwrap_or(whole.as_str());
                let cleaned = digits.replace(',', "");
                if let Ok(value) = cleaned.parse::<f64>() {
                    if value.is_finite() && value > 0.0 {
                        covered.push((whole.start(), whole.end()));
                        found.push((whole.start(), value * multiplier.value()));
                    }
                }
            }
        }

        found.sort_by_key(|&(start, _)| start);
        found.into_iter().map(|(_, value)| value).collect()
    }

    fn extract_years(lower: &str) -> Option<u32> {
        YEARS_PATTERN
            .captures(lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}
