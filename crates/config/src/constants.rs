//! Centralized constants for the mortgage agent
//!
//! Single source of truth for the business numbers used across the
//! codebase. These are UAE mortgage policy figures fixed by business rule,
//! not derived from user input, and they never change at runtime.

/// Financing ratios and lending terms
pub mod financing {
    /// Maximum loan-to-value ratio (UAE central bank cap for expats)
    pub const MAX_LOAN_TO_VALUE: f64 = 0.80;

    /// Minimum down payment as a fraction of property price
    pub const MIN_DOWN_PAYMENT_RATIO: f64 = 0.20;

    /// One-time transaction costs (transfer/agency/misc fees) as a
    /// fraction of property price
    pub const UPFRONT_COST_RATIO: f64 = 0.07;

    /// Standard annual interest rate used for estimates (percent)
    pub const STANDARD_ANNUAL_RATE_PERCENT: f64 = 4.5;

    /// Maximum loan tenure in years
    pub const MAX_TENURE_YEARS: u32 = 25;
}

/// Ownership cost assumptions
pub mod ownership {
    /// Annual maintenance estimate as a fraction of property price.
    /// A flat-rate policy assumption, not a measured quantity.
    pub const ANNUAL_MAINTENANCE_RATIO: f64 = 0.0025;
}

/// Buy-vs-rent decision thresholds
pub mod decision {
    /// Stays shorter than this lean towards renting (years)
    pub const SHORT_STAY_THRESHOLD_YEARS: u32 = 3;

    /// Stays longer than this lean towards buying (years)
    pub const LONG_STAY_THRESHOLD_YEARS: u32 = 5;

    /// Owning may exceed rent by this fraction before renting wins
    pub const RENT_TOLERANCE_RATIO: f64 = 0.10;

    /// Maximum share of monthly income the installment may consume (percent)
    pub const MAX_EMI_INCOME_PERCENT: f64 = 40.0;
}

/// Free-text extraction bounds
pub mod extraction {
    /// Monthly rents above this are assumed to be mis-tagged property
    /// prices (AED/month)
    pub const RENT_PLAUSIBILITY_CEILING: f64 = 100_000.0;
}

/// Service endpoints (defaults)
pub mod endpoints {
    /// Groq OpenAI-compatible API endpoint
    pub const GROQ_DEFAULT: &str = "https://api.groq.com/openai/v1";

    /// OpenAI API endpoint
    pub const OPENAI_DEFAULT: &str = "https://api.openai.com/v1";

    /// Google Gemini API endpoint
    pub const GEMINI_DEFAULT: &str = "https://generativelanguage.googleapis.com";
}

/// Timeouts (milliseconds)
pub mod timeouts {
    /// LLM request timeout (ms)
    pub const LLM_REQUEST_MS: u64 = 60_000;
}

/// Retry policy for the LLM call (the only transient-failure boundary)
pub mod retry {
    /// Maximum attempts before falling back to templated output
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Initial backoff duration, doubled on each retry (ms)
    pub const INITIAL_BACKOFF_MS: u64 = 2_000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financing_ratios_complementary() {
        // The defaults are complements; the policy structs allow decoupling
        assert!((financing::MAX_LOAN_TO_VALUE + financing::MIN_DOWN_PAYMENT_RATIO - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratios_within_unit_interval() {
        assert!(financing::MAX_LOAN_TO_VALUE > 0.0 && financing::MAX_LOAN_TO_VALUE < 1.0);
        assert!(financing::UPFRONT_COST_RATIO > 0.0 && financing::UPFRONT_COST_RATIO < 1.0);
        assert!(ownership::ANNUAL_MAINTENANCE_RATIO > 0.0 && ownership::ANNUAL_MAINTENANCE_RATIO < 1.0);
    }

    #[test]
    fn test_stay_thresholds_ordered() {
        assert!(decision::SHORT_STAY_THRESHOLD_YEARS < decision::LONG_STAY_THRESHOLD_YEARS);
    }

    #[test]
    fn test_retry_bounds_sane() {
        assert!(retry::MAX_ATTEMPTS >= 1);
        assert!(retry::INITIAL_BACKOFF_MS > 0);
    }
}
