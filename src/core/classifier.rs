//! EventClassifier: maps raw user input to an event category
//!
//! Case-sensitive substring search against two fixed keyword sets.
//! Confession keywords are checked first and take precedence when both
//! sets match. Contract: input must be non-empty after trimming; the
//! session layer rejects empty input before classification.

use crate::types::EventCategory;

/// Confession-grade phrases
const CONFESSION_KEYWORDS: &[&str] = &["喜欢你", "爱你", "在一起", "表白", "做我女朋友"];

/// Flirty or unclear-intent phrases
const AMBIGUOUS_KEYWORDS: &[&str] = &["想你", "想见你", "晚安", "早安", "吃饭了吗", "在干嘛"];

/// Keyword classifier for user turns
#[derive(Debug, Default)]
pub struct EventClassifier;

impl EventClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one user turn. Deterministic, no side effects.
    pub fn classify(&self, user_input: &str) -> EventCategory {
        if CONFESSION_KEYWORDS.iter().any(|kw| user_input.contains(kw)) {
            return EventCategory::Confession;
        }
        if AMBIGUOUS_KEYWORDS.iter().any(|kw| user_input.contains(kw)) {
            return EventCategory::Ambiguous;
        }
        EventCategory::Normal
    }
}

// =============================================================================
// TESTS
// =============================================================================
