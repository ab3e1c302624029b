//! Session orchestration
//!
//! One `MortgageAdvisor` per conversation. Session state (history +
//! profile) sits behind a `parking_lot::Mutex` so the advisor can be
//! shared; the lock is never held across the collaborator call.

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use mortgage_agent_config::AdvisorSettings;
use mortgage_agent_core::{ConversationHistory, Turn, UserFinancialProfile};
use mortgage_agent_engine::{MortgageEngine, Recommendation};
use mortgage_agent_llm::{LlmBackend, PromptBuilder};

use crate::template;

/// Advisor configuration
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Turns of history included in prompt context
    pub context_turns: usize,
    /// Persona name the presenter speaks as
    pub persona_name: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            context_turns: 10,
            persona_name: "Zara".to_string(),
        }
    }
}

impl From<&AdvisorSettings> for AdvisorConfig {
    fn from(settings: &AdvisorSettings) -> Self {
        Self {
            context_turns: settings.context_turns,
            persona_name: settings.persona_name.clone(),
        }
    }
}

/// One reply from the advisor
#[derive(Debug, Clone)]
pub struct AdvisorReply {
    /// Text to show the user
    pub text: String,
    /// The recommendation backing the text, when one was produced
    pub recommendation: Option<Recommendation>,
    /// Profile snapshot after this turn
    pub profile: UserFinancialProfile,
    /// True when the text came from the deterministic template rather
    /// than the collaborator
    pub used_fallback: bool,
}

struct SessionState {
    history: ConversationHistory,
    profile: UserFinancialProfile,
}

/// Per-session advisor: engine plus optional LLM presenter
pub struct MortgageAdvisor {
    session_id: String,
    config: AdvisorConfig,
    engine: MortgageEngine,
    backend: Option<Arc<dyn LlmBackend>>,
    session: Mutex<SessionState>,
}

impl MortgageAdvisor {
    /// Advisor with default engine and config
    pub fn new(backend: Option<Arc<dyn LlmBackend>>) -> Self {
        Self::with_config(MortgageEngine::new(), AdvisorConfig::default(), backend)
    }

    pub fn with_config(
        engine: MortgageEngine,
        config: AdvisorConfig,
        backend: Option<Arc<dyn LlmBackend>>,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            config,
            engine,
            backend,
            session: Mutex::new(SessionState {
                history: ConversationHistory::new(),
                profile: UserFinancialProfile::new(),
            }),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Snapshot of the accumulated profile
    pub fn profile(&self) -> UserFinancialProfile {
        self.session.lock().profile.clone()
    }

    pub fn turn_count(&self) -> usize {
        self.session.lock().history.len()
    }

    /// Clear history and profile for a fresh conversation
    pub fn reset(&self) {
        let mut session = self.session.lock();
        session.history.clear();
        session.profile = UserFinancialProfile::new();
    }

    /// Process one user message and produce a reply.
    ///
    /// Never fails: a missing property price yields a clarifying question,
    /// and a collaborator failure falls back to the deterministic template
    /// built from the same supporting facts.
    pub async fn respond(&self, user_text: &str) -> AdvisorReply {
        let (evaluation, context) = {
            let mut session = self.session.lock();
            session.history.push(Turn::user(user_text));

            let evaluation = self.engine.evaluate(user_text, &session.profile);
            session.profile = evaluation.profile.clone();

            let context = session.history.context(self.config.context_turns);
            (evaluation, context)
        };

        let mut used_fallback = false;
        let text = match evaluation.recommendation {
            Some(ref recommendation) => {
                match self.present(recommendation, &evaluation.profile, &context).await {
                    Some(text) => text,
                    None => {
                        used_fallback = true;
                        self.fallback_text(recommendation, &evaluation.profile)
                    }
                }
            }
            None => template::clarifying_prompt(&evaluation.profile),
        };

        self.session.lock().history.push(Turn::assistant(text.as_str()));

        AdvisorReply {
            text,
            recommendation: evaluation.recommendation,
            profile: evaluation.profile,
            used_fallback,
        }
    }

    /// Ask the collaborator to phrase the recommendation; `None` means the
    /// caller should use the deterministic template instead.
    async fn present(
        &self,
        recommendation: &Recommendation,
        profile: &UserFinancialProfile,
        context: &str,
    ) -> Option<String> {
        let backend = self.backend.as_ref()?;

        let messages = PromptBuilder::new(self.config.persona_name.as_str())
            .with_conversation(context)
            .with_profile(profile)
            .presentation(recommendation);

        match backend.generate(&messages).await {
            Ok(result) => Some(result.text),
            Err(e) => {
                tracing::warn!(
                    session = %self.session_id,
                    error = %e,
                    "collaborator unavailable, using templated fallback"
                );
                None
            }
        }
    }

    fn fallback_text(
        &self,
        recommendation: &Recommendation,
        profile: &UserFinancialProfile,
    ) -> String {
        let mut text = template::render_recommendation(recommendation);
        if template::needs_follow_up(recommendation) {
            if let Some(question) = template::follow_up_question(profile) {
                text.push(' ');
                text.push_str(&question);
            }
        }
        text
    }
}
