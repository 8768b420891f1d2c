//! Hidden emotional state: six bounded dimensions plus bounded memory
//!
//! Invariant: after every mutation all six dimensions lie within their
//! closed range. `clamp()` is idempotent and runs after every external
//! or internal write, including directive-driven overrides.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    COLD_MODE_WARMTH, DIMENSION_MAX, DISTANCING_DISAPPOINTMENT, HIGH_ALERT_TENSION,
    RETRACTION_CONTENT_CHARS, RETRACTION_MEMORY_CAP, WARMTH_MAX, WARMTH_MIN,
};
use crate::types::SpecialState;

/// The closed set of mutable state dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Warmth,
    Tension,
    Trust,
    Disappointment,
    Need,
    Rhythm,
}

impl Dimension {
    /// All dimensions, in record order
    pub fn all() -> [Dimension; 6] {
        [
            Dimension::Warmth,
            Dimension::Tension,
            Dimension::Trust,
            Dimension::Disappointment,
            Dimension::Need,
            Dimension::Rhythm,
        ]
    }

    /// Field name as it appears in persisted records
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Warmth => "warmth",
            Dimension::Tension => "tension",
            Dimension::Trust => "trust",
            Dimension::Disappointment => "disappointment",
            Dimension::Need => "need",
            Dimension::Rhythm => "rhythm",
        }
    }

    /// Parse a record field name; unknown names are rejected
    pub fn parse(name: &str) -> Option<Dimension> {
        match name {
            "warmth" => Some(Dimension::Warmth),
            "tension" => Some(Dimension::Tension),
            "trust" => Some(Dimension::Trust),
            "disappointment" => Some(Dimension::Disappointment),
            "need" => Some(Dimension::Need),
            "rhythm" => Some(Dimension::Rhythm),
            _ => None,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One remembered retraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetractionRecord {
    /// Retracted content, truncated to 50 characters
    pub content: String,
    /// When the retraction was observed
    pub timestamp: DateTime<Utc>,
}

impl RetractionRecord {
    /// Create a record with the content truncated to the memory limit
    pub fn new(content: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: content.chars().take(RETRACTION_CONTENT_CHARS).collect(),
            timestamp,
        }
    }
}

/// Hidden emotional state dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    /// -5..=5: cold ↔ warm
    #[serde(default)]
    pub warmth: i64,
    /// 0..=10: romantic/ambiguous tension
    #[serde(default)]
    pub tension: i64,
    /// 0..=10: accumulated trust
    #[serde(default = "default_trust")]
    pub trust: i64,
    /// 0..=10: accumulated letdown
    #[serde(default)]
    pub disappointment: i64,
    /// 0..=10: felt-needed score
    #[serde(default = "default_need")]
    pub need: i64,
    /// 0..=10: conversational rhythm match
    #[serde(default = "default_rhythm")]
    pub rhythm: i64,

    /// Remembered retractions, oldest first, capped at 5
    #[serde(default)]
    pub retraction_memory: Vec<RetractionRecord>,
    /// Timestamp of the most recent applied event
    #[serde(default)]
    pub last_interaction: Option<DateTime<Utc>>,
}

fn default_trust() -> i64 {
    5
}

fn default_need() -> i64 {
    3
}

fn default_rhythm() -> i64 {
    5
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self {
            warmth: 0,
            tension: 0,
            trust: 5,
            disappointment: 0,
            need: 3,
            rhythm: 5,
            retraction_memory: Vec::new(),
            last_interaction: None,
        }
    }
}

impl EmotionalState {
    /// Ensure all dimensions are within their valid ranges.
    /// Idempotent and total.
    pub fn clamp(&mut self) {
        self.warmth = self.warmth.clamp(WARMTH_MIN, WARMTH_MAX);
        self.tension = self.tension.clamp(0, DIMENSION_MAX);
        self.trust = self.trust.clamp(0, DIMENSION_MAX);
        self.disappointment = self.disappointment.clamp(0, DIMENSION_MAX);
        self.need = self.need.clamp(0, DIMENSION_MAX);
        self.rhythm = self.rhythm.clamp(0, DIMENSION_MAX);
    }

    /// Read a dimension
    pub fn get_dimension(&self, dim: Dimension) -> i64 {
        match dim {
            Dimension::Warmth => self.warmth,
            Dimension::Tension => self.tension,
            Dimension::Trust => self.trust,
            Dimension::Disappointment => self.disappointment,
            Dimension::Need => self.need,
            Dimension::Rhythm => self.rhythm,
        }
    }

    /// Overwrite a dimension. The caller clamps once after the batch;
    /// this is the only direct-override path besides the transition
    /// table's additive deltas.
    pub fn set_dimension(&mut self, dim: Dimension, value: i64) {
        match dim {
            Dimension::Warmth => self.warmth = value,
            Dimension::Tension => self.tension = value,
            Dimension::Trust => self.trust = value,
            Dimension::Disappointment => self.disappointment = value,
            Dimension::Need => self.need = value,
            Dimension::Rhythm => self.rhythm = value,
        }
    }

    /// Remember a retraction, dropping the oldest beyond the cap
    pub fn remember_retraction(&mut self, content: &str, timestamp: DateTime<Utc>) {
        self.retraction_memory
            .push(RetractionRecord::new(content, timestamp));
        if self.retraction_memory.len() > RETRACTION_MEMORY_CAP {
            let excess = self.retraction_memory.len() - RETRACTION_MEMORY_CAP;
            self.retraction_memory.drain(0..excess);
        }
    }

    /// Special-state membership, tested post-clamp
    pub fn special_states(&self) -> Vec<SpecialState> {
        let mut states = Vec::new();
        if self.disappointment >= DISTANCING_DISAPPOINTMENT {
            states.push(SpecialState::DistancingMode);
        }
        if self.tension >= HIGH_ALERT_TENSION {
            states.push(SpecialState::HighAlert);
        }
        if self.warmth <= COLD_MODE_WARMTH {
            states.push(SpecialState::ColdMode);
        }
        states
    }

    /// Convert to a plain key-value record
    pub fn to_value(&self) -> serde_json::Value {
        // Serialization of this struct cannot fail: every field is a
        // plain integer, string, or RFC 3339 timestamp
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Build from a plain record. Missing keys fall back to defaults,
    /// unknown keys are ignored.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let state = EmotionalState::default();
        assert_eq!(state.warmth, 0);
        assert_eq!(state.tension, 0);
        assert_eq!(state.trust, 5);
        assert_eq!(state.disappointment, 0);
        assert_eq!(state.need, 3);
        assert_eq!(state.rhythm, 5);
        assert!(state.retraction_memory.is_empty());
        assert!(state.last_interaction.is_none());
    }

    #[test]
    fn test_clamp_pulls_into_range() {
        let mut state = EmotionalState {
            warmth: 99,
            tension: -4,
            trust: 11,
            disappointment: -1,
            need: 200,
            rhythm: -200,
            ..Default::default()
        };
        state.clamp();
        assert_eq!(state.warmth, 5);
        assert_eq!(state.tension, 0);
        assert_eq!(state.trust, 10);
        assert_eq!(state.disappointment, 0);
        assert_eq!(state.need, 10);
        assert_eq!(state.rhythm, 0);
    }

    #[test]
    fn test_clamp_idempotent() {
        let mut state = EmotionalState {
            warmth: -12,
            tension: 30,
            ..Default::default()
        };
        state.clamp();
        let once = state.clone();
        state.clamp();
        assert_eq!(state, once);
    }

    #[test]
    fn test_dimension_roundtrip_names() {
        for dim in Dimension::all() {
            assert_eq!(Dimension::parse(dim.name()), Some(dim));
        }
        assert_eq!(Dimension::parse("mood"), None);
    }

    #[test]
    fn test_set_and_get_dimension() {
        let mut state = EmotionalState::default();
        state.set_dimension(Dimension::Warmth, -5);
        assert_eq!(state.get_dimension(Dimension::Warmth), -5);
        state.set_dimension(Dimension::Need, 9);
        assert_eq!(state.need, 9);
    }

    #[test]
    fn test_retraction_memory_cap() {
        let mut state = EmotionalState::default();
        for i in 0..7 {
            state.remember_retraction(&format!("msg{}", i), Utc::now());
        }
        assert_eq!(state.retraction_memory.len(), 5);
        // Oldest two dropped, most recent five kept in order
        assert_eq!(state.retraction_memory[0].content, "msg2");
        assert_eq!(state.retraction_memory[4].content, "msg6");
    }

    #[test]
    fn test_retraction_content_truncated() {
        let long: String = "啊".repeat(80);
        let record = RetractionRecord::new(&long, Utc::now());
        assert_eq!(record.content.chars().count(), 50);
    }

    #[test]
    fn test_value_roundtrip() {
        let mut state = EmotionalState::default();
        state.warmth = 3;
        state.tension = 7;
        state.remember_retraction("对不起", Utc::now());
        state.last_interaction = Some(Utc::now());

        let restored = EmotionalState::from_value(state.to_value());
        assert_eq!(restored, state);
    }

    #[test]
    fn test_from_value_partial_record() {
        let value = serde_json::json!({ "warmth": 2, "unknown_key": 9 });
        let state = EmotionalState::from_value(value);
        assert_eq!(state.warmth, 2);
        // Missing keys fall back to defaults
        assert_eq!(state.trust, 5);
        assert_eq!(state.need, 3);
    }

    #[test]
    fn test_special_states_memberships() {
        let mut state = EmotionalState::default();
        assert!(state.special_states().is_empty());

        state.disappointment = 7;
        state.tension = 8;
        state.warmth = -3;
        let states = state.special_states();
        assert!(states.contains(&SpecialState::DistancingMode));
        assert!(states.contains(&SpecialState::HighAlert));
        assert!(states.contains(&SpecialState::ColdMode));
    }
}
