//! Session: single-threaded, turn-based orchestration
//!
//! One session owns one state store and one history buffer. A turn is
//! processed start to finish before the next input is accepted. The
//! causing event's state change commits before the reply source runs,
//! so a generator failure never leaves state half-updated: the user's
//! message still landed emotionally even if the reply could not be
//! produced.

use std::collections::VecDeque;
use tracing::{debug, warn};

use crate::core::{ControlProtocol, EventClassifier, TimingModel, TransitionTable};
use crate::types::{
    ControlDirectives, EmotionalState, EventCategory, EventKind, SpecialState, TimingPlan,
};
use crate::{HISTORY_CAP, HISTORY_CONTEXT_TURNS, RETRACTION_VISIBLE_MIN_MS};

/// Filler reply used when the reply source fails
pub const FILLER_REPLY: &str = "……";

/// Who said a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One history entry handed to the reply source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// FIFO-capped conversation history
#[derive(Debug, Default)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, dropping the oldest beyond the cap
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.entries.push_back(HistoryEntry {
            role,
            content: content.into(),
        });
        while self.entries.len() > HISTORY_CAP {
            self.entries.pop_front();
        }
    }

    /// The most recent entries handed to the reply source
    pub fn context(&self) -> Vec<&HistoryEntry> {
        let skip = self.entries.len().saturating_sub(HISTORY_CONTEXT_TURNS);
        self.entries.iter().skip(skip).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Failure of the external text source. Caught at the boundary and
/// mapped to a filler reply; never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorError(pub String);

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reply source failed: {}", self.0)
    }
}

impl std::error::Error for GeneratorError {}

/// Opaque reply-text collaborator. The core never depends on its
/// transport, auth, or retry policy.
pub trait ReplySource {
    fn generate(
        &mut self,
        system_prompt: &str,
        history: &[&HistoryEntry],
    ) -> Result<String, GeneratorError>;
}

/// A retraction the partner may have noticed
#[derive(Debug, Clone)]
struct PendingRetraction {
    content: String,
    visible_ms: u64,
}

/// Everything one processed turn produced
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Final category of the turn (retraction supersedes the classifier)
    pub category: EventCategory,
    /// Timing decision for the reply
    pub plan: TimingPlan,
    /// Clean reply text; None means read-without-reply
    pub reply: Option<String>,
    /// Directives extracted from the raw reply
    pub directives: ControlDirectives,
    /// Special states active after the turn
    pub special_states: Vec<SpecialState>,
}

/// One conversation session
#[derive(Debug)]
pub struct Session {
    state: EmotionalState,
    history: HistoryBuffer,
    classifier: EventClassifier,
    table: TransitionTable,
    timing: TimingModel,
    control: ControlProtocol,
    system_prompt: String,
    pending_retraction: Option<PendingRetraction>,
}

impl Session {
    /// Create a session with a default state and entropy-seeded timing
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self::with_state(system_prompt, EmotionalState::default())
    }

    /// Create a session around an existing state
    pub fn with_state(system_prompt: impl Into<String>, state: EmotionalState) -> Self {
        Self {
            state,
            history: HistoryBuffer::new(),
            classifier: EventClassifier::new(),
            table: TransitionTable::new(),
            timing: TimingModel::new(),
            control: ControlProtocol::new(),
            system_prompt: system_prompt.into(),
            pending_retraction: None,
        }
    }

    /// Replace the timing model (e.g. with a seeded one for tests)
    pub fn set_timing_model(&mut self, timing: TimingModel) {
        self.timing = timing;
    }

    pub fn state(&self) -> &EmotionalState {
        &self.state
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Record that the user retracted a message that had been visible
    /// for `visible_ms`. Noticed on the next turn if it was visible
    /// long enough.
    pub fn observe_retraction(&mut self, content: impl Into<String>, visible_ms: u64) {
        self.pending_retraction = Some(PendingRetraction {
            content: content.into(),
            visible_ms,
        });
    }

    /// Process one user turn. Returns None for empty input, which is
    /// rejected before classification.
    pub fn process_turn(
        &mut self,
        user_input: &str,
        source: &mut dyn ReplySource,
    ) -> Option<TurnOutcome> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return None;
        }

        // Classify and commit the causing event before anything that
        // could delay or fail
        let mut category = self.classifier.classify(user_input);
        match category {
            EventCategory::Confession => {
                self.table.apply(&mut self.state, EventKind::Confession, None);
            }
            EventCategory::Ambiguous => {
                self.table
                    .apply(&mut self.state, EventKind::SaidAmbiguous, None);
            }
            _ => {}
        }

        // A retraction noticed since last turn supersedes the category
        if let Some(pending) = self.pending_retraction.take() {
            if pending.visible_ms >= RETRACTION_VISIBLE_MIN_MS {
                self.table.apply(
                    &mut self.state,
                    EventKind::RetractionSeen,
                    Some(&pending.content),
                );
                category = EventCategory::Retraction;
            }
        }

        self.history.push(Role::User, user_input);

        let plan = self.timing.calculate(&self.state, category);

        if !plan.should_reply {
            debug!(%category, "withholding reply");
            return Some(TurnOutcome {
                category,
                plan,
                reply: None,
                directives: ControlDirectives::default(),
                special_states: self.state.special_states(),
            });
        }

        let generated = {
            let context = self.history.context();
            source.generate(&self.system_prompt, &context)
        };

        let (reply, directives) = match generated {
            Ok(raw) => {
                let (clean, directives) = self.control.parse(&raw);
                self.control.apply_state_updates(&mut self.state, &directives);
                self.history.push(Role::Assistant, clean.clone());
                (clean, directives)
            }
            Err(err) => {
                // State already committed; the reply degrades, not
                // the relationship bookkeeping
                warn!(%err, "reply source failed, using filler");
                (FILLER_REPLY.to_string(), ControlDirectives::default())
            }
        };

        Some(TurnOutcome {
            category,
            plan,
            reply: Some(reply),
            directives,
            special_states: self.state.special_states(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct ScriptedSource {
        replies: Vec<String>,
    }

    impl ScriptedSource {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: replies.iter().rev().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl ReplySource for ScriptedSource {
        fn generate(
            &mut self,
            _system_prompt: &str,
            _history: &[&HistoryEntry],
        ) -> Result<String, GeneratorError> {
            self.replies
                .pop()
                .ok_or_else(|| GeneratorError("script exhausted".to_string()))
        }
    }

    struct FailingSource;

    impl ReplySource for FailingSource {
        fn generate(
            &mut self,
            _system_prompt: &str,
            _history: &[&HistoryEntry],
        ) -> Result<String, GeneratorError> {
            Err(GeneratorError("connection refused".to_string()))
        }
    }

    fn seeded_session() -> Session {
        let mut session = Session::new("prompt");
        session.set_timing_model(TimingModel::with_seed(1));
        session
    }

    #[test]
    fn test_empty_input_rejected_before_classification() {
        let mut session = seeded_session();
        let mut source = ScriptedSource::new(&["嗯"]);

        assert!(session.process_turn("   ", &mut source).is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_normal_turn_flow() {
        let mut session = seeded_session();
        let mut source = ScriptedSource::new(&["嗯，刚下课。"]);

        let outcome = session.process_turn("今天忙吗", &mut source).unwrap();

        assert_eq!(outcome.category, EventCategory::Normal);
        assert_eq!(outcome.reply.as_deref(), Some("嗯，刚下课。"));
        assert_eq!(session.history().len(), 2);
        // Normal turns apply no table event
        assert_eq!(session.state().tension, 0);
    }

    #[test]
    fn test_confession_commits_before_generation() {
        let mut session = seeded_session();
        let mut source = FailingSource;

        let outcome = session.process_turn("我喜欢你", &mut source).unwrap();

        // Tension committed even though the generator failed
        assert_eq!(session.state().tension, 5);
        if let Some(reply) = outcome.reply {
            assert_eq!(reply, FILLER_REPLY);
        }
        // Failed reply never enters history
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_ambiguous_applies_said_ambiguous() {
        let mut session = seeded_session();
        let mut source = ScriptedSource::new(&["晚安。"]);

        let outcome = session.process_turn("晚安", &mut source).unwrap();

        assert_eq!(outcome.category, EventCategory::Ambiguous);
        assert_eq!(session.state().tension, 2);
    }

    #[test]
    fn test_retraction_supersedes_category() {
        let mut session = seeded_session();
        let mut source = ScriptedSource::new(&["？你刚刚说什么"]);

        session.observe_retraction("我想见你", 5_000);
        let outcome = session.process_turn("没什么", &mut source).unwrap();

        assert_eq!(outcome.category, EventCategory::Retraction);
        // Base 2 + emotional keyword bonus 2
        assert_eq!(session.state().tension, 4);
        assert_eq!(session.state().retraction_memory.len(), 1);
    }

    #[test]
    fn test_fast_retraction_goes_unnoticed() {
        let mut session = seeded_session();
        let mut source = ScriptedSource::new(&["嗯"]);

        session.observe_retraction("我想见你", 1_000);
        let outcome = session.process_turn("没什么", &mut source).unwrap();

        assert_eq!(outcome.category, EventCategory::Normal);
        assert_eq!(session.state().tension, 0);
        assert!(session.state().retraction_memory.is_empty());
    }

    #[test]
    fn test_reply_directives_overwrite_state() {
        let mut session = seeded_session();
        let mut source = ScriptedSource::new(&["<!--state:warmth=-5-->哦。"]);

        let outcome = session.process_turn("随便聊聊", &mut source).unwrap();

        assert_eq!(outcome.reply.as_deref(), Some("哦。"));
        assert_eq!(session.state().warmth, -5);
    }

    #[test]
    fn test_history_cap_and_context() {
        let mut session = seeded_session();

        for i in 0..60 {
            let mut source = ScriptedSource::new(&["好。"]);
            session.process_turn(&format!("消息{}", i), &mut source);
        }

        assert_eq!(session.history().len(), HISTORY_CAP);
        assert_eq!(session.history().context().len(), HISTORY_CONTEXT_TURNS);
        // Oldest dropped first; the newest assistant turn survives
        let last = session.history().iter().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
    }
}
