//! Event vocabulary: relationship events, turn categories, special states

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Dimension;

/// The closed set of relationship events the transition table accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    // Positive
    ConsistentDaily,
    RememberedDetail,
    PatientWaiting,
    SharedPersonal,
    NaturalRhythm,
    ShowedCare,
    // Negative
    EagerPush,
    Disappeared24h,
    ObviousDismissal,
    InconsistentStory,
    ForgotDetail,
    MissedEmotion,
    SelfCentered,
    // Tension-raising
    SaidAmbiguous,
    RetractionSeen,
    AskedFeelings,
    Confession,
    // Neutral
    NormalChat,
    LongSilence,
    TimePassedDay,
}

impl EventKind {
    /// All registered events, table order
    pub fn all() -> &'static [EventKind] {
        use EventKind::*;
        &[
            ConsistentDaily,
            RememberedDetail,
            PatientWaiting,
            SharedPersonal,
            NaturalRhythm,
            ShowedCare,
            EagerPush,
            Disappeared24h,
            ObviousDismissal,
            InconsistentStory,
            ForgotDetail,
            MissedEmotion,
            SelfCentered,
            SaidAmbiguous,
            RetractionSeen,
            AskedFeelings,
            Confession,
            NormalChat,
            LongSilence,
            TimePassedDay,
        ]
    }

    /// Event name as accepted by the CLI and persisted records
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::ConsistentDaily => "consistent_daily",
            EventKind::RememberedDetail => "remembered_detail",
            EventKind::PatientWaiting => "patient_waiting",
            EventKind::SharedPersonal => "shared_personal",
            EventKind::NaturalRhythm => "natural_rhythm",
            EventKind::ShowedCare => "showed_care",
            EventKind::EagerPush => "eager_push",
            EventKind::Disappeared24h => "disappeared_24h",
            EventKind::ObviousDismissal => "obvious_dismissal",
            EventKind::InconsistentStory => "inconsistent_story",
            EventKind::ForgotDetail => "forgot_detail",
            EventKind::MissedEmotion => "missed_emotion",
            EventKind::SelfCentered => "self_centered",
            EventKind::SaidAmbiguous => "said_ambiguous",
            EventKind::RetractionSeen => "retraction_seen",
            EventKind::AskedFeelings => "asked_feelings",
            EventKind::Confession => "confession",
            EventKind::NormalChat => "normal_chat",
            EventKind::LongSilence => "long_silence",
            EventKind::TimePassedDay => "time_passed_day",
        }
    }

    /// Parse an event name; unknown names are rejected
    pub fn parse(name: &str) -> Option<EventKind> {
        EventKind::all().iter().copied().find(|e| e.name() == name)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classification of one raw user turn, feeding the timing model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Normal,
    Ambiguous,
    Confession,
    Retraction,
    Question,
    Silence,
}

impl EventCategory {
    pub fn name(&self) -> &'static str {
        match self {
            EventCategory::Normal => "normal",
            EventCategory::Ambiguous => "ambiguous",
            EventCategory::Confession => "confession",
            EventCategory::Retraction => "retraction",
            EventCategory::Question => "question",
            EventCategory::Silence => "silence",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Modes the relationship can slip into once a dimension crosses its
/// threshold; recomputed after every applied event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialState {
    DistancingMode,
    HighAlert,
    ColdMode,
}

impl SpecialState {
    pub fn name(&self) -> &'static str {
        match self {
            SpecialState::DistancingMode => "distancing_mode",
            SpecialState::HighAlert => "high_alert",
            SpecialState::ColdMode => "cold_mode",
        }
    }
}

impl std::fmt::Display for SpecialState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of applying one event to the state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyOutcome {
    /// Per-dimension deltas that were applied (fractional values
    /// truncate toward the integer after addition)
    pub changes: BTreeMap<Dimension, f64>,
    /// Special states active after the event, post-clamp
    pub special_states: Vec<SpecialState>,
}

// =============================================================================
// TESTS
// =============================================================================
