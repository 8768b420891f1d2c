//! Error taxonomy
//!
//! Nothing here is fatal: unknown events are no-ops on state, malformed
//! directives are dropped per key at the parse site, and a missing
//! state file is the default state.

use serde::{Deserialize, Serialize};

/// Recoverable errors surfaced by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "error", content = "detail", rename_all = "snake_case")]
pub enum WallError {
    /// Event name not in the registered transition table
    UnknownEvent(String),
    /// Filesystem failure while persisting or loading state
    Storage(String),
    /// State record failed to serialize or deserialize
    Serialize(String),
}

impl std::fmt::Display for WallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WallError::UnknownEvent(name) => write!(f, "Unknown event: {}", name),
            WallError::Storage(detail) => write!(f, "Storage error: {}", detail),
            WallError::Serialize(detail) => write!(f, "Serialization error: {}", detail),
        }
    }
}

impl std::error::Error for WallError {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = WallError::UnknownEvent("not_a_real_event".to_string());
        assert_eq!(err.to_string(), "Unknown event: not_a_real_event");
    }

    #[test]
    fn test_error_object_shape() {
        let err = WallError::UnknownEvent("xyz".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["error"], "unknown_event");
        assert_eq!(json["detail"], "xyz");
    }
}
