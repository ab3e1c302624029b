//! Prompt construction for the presentation call
//!
//! The collaborator receives the recommendation's supporting facts as a
//! JSON block with an explicit contract: the figures are pre-computed and
//! authoritative, to be phrased in natural language but never recomputed.

use serde::{Deserialize, Serialize};

use mortgage_agent_core::UserFinancialProfile;
use mortgage_agent_engine::Recommendation;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Builds the message list for a presentation request
pub struct PromptBuilder {
    persona_name: String,
    conversation_context: Option<String>,
    profile_context: Option<String>,
}

impl PromptBuilder {
    pub fn new(persona_name: impl Into<String>) -> Self {
        Self {
            persona_name: persona_name.into(),
            conversation_context: None,
            profile_context: None,
        }
    }

    /// Recent conversation turns, formatted one per line
    pub fn with_conversation(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        if !context.is_empty() {
            self.conversation_context = Some(context);
        }
        self
    }

    /// The accumulated session facts
    pub fn with_profile(mut self, profile: &UserFinancialProfile) -> Self {
        self.profile_context = Some(profile.to_context_string());
        self
    }

    /// Assemble the messages for presenting a recommendation
    pub fn presentation(&self, recommendation: &Recommendation) -> Vec<Message> {
        let facts_json = serde_json::to_string_pretty(&recommendation.facts)
            .unwrap_or_else(|_| "{}".to_string());

        let system = format!(
            "You are {}, a friendly UAE mortgage advisor helping expats \
             understand home financing. All amounts are AED.\n\
             The figures below were already computed and are authoritative: \
             present them in plain words, but do NOT recompute, re-derive, \
             or alter any number.",
            self.persona_name
        );

        let mut user = String::new();
        if let Some(ref context) = self.conversation_context {
            user.push_str("CONVERSATION:\n");
            user.push_str(context);
            user.push_str("\n\n");
        }
        if let Some(ref profile) = self.profile_context {
            user.push_str("KNOWN FACTS:\n");
            user.push_str(profile);
            user.push_str("\n\n");
        }
        user.push_str(&format!(
            "RECOMMENDATION: {}\nREASON: {}\n\nSUPPORTING FIGURES (authoritative, \
             pre-rounded):\n{}\n\nRespond naturally and concisely, explaining the \
             recommendation and the figures in plain words.",
            recommendation.verdict, recommendation.reason, facts_json
        ));

        vec![Message::system(system), Message::user(user)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_agent_config::{DecisionThresholds, LendingPolicy};
    use mortgage_agent_engine::decide;

    fn sample_recommendation() -> Recommendation {
        let profile = UserFinancialProfile {
            property_price: Some(2_000_000.0),
            planning_years: Some(6),
            ..Default::default()
        };
        decide(
            &profile,
            &LendingPolicy::default(),
            &DecisionThresholds::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_presentation_messages_shape() {
        let rec = sample_recommendation();
        let messages = PromptBuilder::new("Zara").presentation(&rec);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn test_system_prompt_forbids_recomputation() {
        let rec = sample_recommendation();
        let messages = PromptBuilder::new("Zara").presentation(&rec);

        assert!(messages[0].content.contains("Zara"));
        assert!(messages[0].content.contains("do NOT recompute"));
    }

    #[test]
    fn test_user_prompt_carries_facts_and_context() {
        let rec = sample_recommendation();
        let profile = UserFinancialProfile {
            property_price: Some(2_000_000.0),
            ..Default::default()
        };
        let messages = PromptBuilder::new("Zara")
            .with_conversation("user: can I afford a 2m flat?")
            .with_profile(&profile)
            .presentation(&rec);

        let user = &messages[1].content;
        assert!(user.contains("CONVERSATION:"));
        assert!(user.contains("KNOWN FACTS:"));
        assert!(user.contains("\"loan_amount\": 1600000.0"));
        assert!(user.contains("RECOMMENDATION: Buy"));
    }
}
