//! Structured directives extracted from one candidate reply

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Dimension, Pace};

/// Machine-actionable directives a reply can embed via control tags.
/// Malformed keys are dropped at parse time; the record only ever
/// carries well-formed entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDirectives {
    /// Explicit typing-indicator duration override (milliseconds)
    pub typing_duration: Option<u64>,
    /// Requested pace; defaults to normal when absent or unknown
    pub pace: Pace,
    /// Dimension overrides (overwrite, not add)
    pub state_updates: BTreeMap<Dimension, i64>,
    /// Pause points: character offset in the clean text → pause ms
    pub inline_pauses: BTreeMap<usize, u64>,
}

impl Default for ControlDirectives {
    fn default() -> Self {
        Self {
            typing_duration: None,
            pace: Pace::Normal,
            state_updates: BTreeMap::new(),
            inline_pauses: BTreeMap::new(),
        }
    }
}

impl ControlDirectives {
    /// True when no tag produced any usable directive
    pub fn is_empty(&self) -> bool {
        self.typing_duration.is_none()
            && self.pace == Pace::Normal
            && self.state_updates.is_empty()
            && self.inline_pauses.is_empty()
    }
}
