//! Per-session mortgage advisor
//!
//! Ties the deterministic engine to the LLM presentation boundary for one
//! conversation: each session owns its own history and profile, so
//! concurrent conversations are isolated by construction. When the
//! collaborator is unavailable or fails after retries, replies degrade to
//! deterministic templates built from the same supporting facts.

pub mod advisor;
pub mod template;

pub use advisor::{AdvisorConfig, AdvisorReply, MortgageAdvisor};
