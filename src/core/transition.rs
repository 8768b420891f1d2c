//! TransitionTable: named relationship events and their fixed deltas
//!
//! The table is closed: an unregistered event name is an error value
//! and a no-op on state. Fractional deltas truncate toward the integer
//! after addition, consistent with the integer dimension storage.

use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

use crate::types::{ApplyOutcome, Dimension, EmotionalState, EventKind, WallError};

/// Phrases in retracted content that raise extra tension
const EMOTIONAL_KEYWORDS: &[&str] = &["喜欢", "想你", "想见", "在一起", "讨厌", "烦", "对不起"];

/// Extra tension when a retraction carried emotional content
const RETRACTION_EMOTIONAL_BONUS: f64 = 2.0;

impl EventKind {
    /// Fixed per-dimension deltas for this event
    pub fn deltas(&self) -> &'static [(Dimension, f64)] {
        use Dimension::*;
        match self {
            // Positive
            EventKind::ConsistentDaily => &[(Warmth, 1.0), (Trust, 1.0), (Rhythm, 1.0)],
            EventKind::RememberedDetail => &[(Warmth, 2.0), (Trust, 1.0), (Need, 1.0)],
            EventKind::PatientWaiting => &[(Warmth, 1.0), (Rhythm, 1.0)],
            EventKind::SharedPersonal => &[(Trust, 1.0), (Warmth, 1.0)],
            EventKind::NaturalRhythm => &[(Trust, 1.0), (Rhythm, 1.0)],
            EventKind::ShowedCare => &[(Warmth, 1.0), (Need, 1.0)],
            // Negative
            EventKind::EagerPush => &[(Warmth, -1.0), (Tension, 2.0), (Rhythm, -1.0)],
            EventKind::Disappeared24h => &[(Warmth, -1.0), (Disappointment, 1.0)],
            EventKind::ObviousDismissal => &[(Warmth, -2.0), (Trust, -1.0)],
            EventKind::InconsistentStory => &[(Trust, -2.0)],
            EventKind::ForgotDetail => &[(Disappointment, 2.0), (Need, -1.0)],
            EventKind::MissedEmotion => &[(Disappointment, 1.0)],
            EventKind::SelfCentered => &[(Disappointment, 1.0), (Warmth, -1.0)],
            // Tension-raising
            EventKind::SaidAmbiguous => &[(Tension, 2.0)],
            EventKind::RetractionSeen => &[(Tension, 2.0)],
            EventKind::AskedFeelings => &[(Tension, 1.0)],
            EventKind::Confession => &[(Tension, 5.0)],
            // Neutral
            EventKind::NormalChat => &[(Tension, -0.5), (Rhythm, 0.5)],
            EventKind::LongSilence => &[(Tension, -1.0)],
            EventKind::TimePassedDay => &[(Disappointment, -0.5)],
        }
    }
}

/// The event transition table
#[derive(Debug, Default)]
pub struct TransitionTable;

impl TransitionTable {
    pub fn new() -> Self {
        Self
    }

    /// Apply a named event. Unknown names return an error without
    /// touching the state.
    pub fn apply_event(
        &self,
        state: &mut EmotionalState,
        event_name: &str,
        content: Option<&str>,
    ) -> Result<ApplyOutcome, WallError> {
        let event = EventKind::parse(event_name)
            .ok_or_else(|| WallError::UnknownEvent(event_name.to_string()))?;
        Ok(self.apply(state, event, content))
    }

    /// Apply a registered event
    pub fn apply(
        &self,
        state: &mut EmotionalState,
        event: EventKind,
        content: Option<&str>,
    ) -> ApplyOutcome {
        let mut changes: BTreeMap<Dimension, f64> = event
            .deltas()
            .iter()
            .map(|(dim, delta)| (*dim, *delta))
            .collect();

        let now = Utc::now();

        if event == EventKind::RetractionSeen {
            if let Some(content) = content.filter(|c| !c.is_empty()) {
                if EMOTIONAL_KEYWORDS.iter().any(|kw| content.contains(kw)) {
                    *changes.entry(Dimension::Tension).or_insert(0.0) +=
                        RETRACTION_EMOTIONAL_BONUS;
                }
                state.remember_retraction(content, now);
            }
        }

        for (dim, delta) in &changes {
            let current = state.get_dimension(*dim);
            // Truncation toward the integer, matching integer storage
            state.set_dimension(*dim, (current as f64 + delta).trunc() as i64);
        }

        state.last_interaction = Some(now);
        state.clamp();

        let special_states = state.special_states();
        debug!(event = %event, ?special_states, "event applied");

        ApplyOutcome {
            changes,
            special_states,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
