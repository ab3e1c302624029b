//! Core types for the mortgage agent
//!
//! This crate provides foundational types used across all other crates:
//! - Error types
//! - The per-session financial profile and its merge semantics
//! - Conversation types (turns, history, context windows)

pub mod conversation;
pub mod error;
pub mod profile;

pub use conversation::{ConversationHistory, Turn, TurnRole};
pub use error::{Error, Result};
pub use profile::{ProfileField, ProfileUpdate, UserFinancialProfile};
