//! StateStore: persistence of one session's emotional state
//!
//! A missing file is the default state, never an error. Saves are
//! whole-file pretty JSON; partial records load fine (missing keys
//! fall back to defaults, unknown keys are ignored).

use std::path::{Path, PathBuf};

use crate::types::{EmotionalState, WallError};

/// Owns the one emotional state of a conversation session
#[derive(Debug, Default)]
pub struct StateStore {
    state: EmotionalState,
}

impl StateStore {
    /// Create a store around a default state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store around an existing state
    pub fn with_state(state: EmotionalState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &EmotionalState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EmotionalState {
        &mut self.state
    }

    /// Replace the state with a fresh default
    pub fn reset(&mut self) {
        self.state = EmotionalState::default();
    }

    /// Load from a JSON file; a missing path yields the default state
    pub fn load(path: &Path) -> Result<Self, WallError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| WallError::Storage(format!("{}: {}", path.display(), e)))?;
        let mut state: EmotionalState =
            serde_json::from_str(&json).map_err(|e| WallError::Serialize(e.to_string()))?;
        state.clamp();
        Ok(Self { state })
    }

    /// Save to a JSON file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), WallError> {
        let json = serde_json::to_string_pretty(&self.state)
            .map_err(|e| WallError::Serialize(e.to_string()))?;
        if let Some(parent) = non_empty_parent(path) {
            std::fs::create_dir_all(&parent)
                .map_err(|e| WallError::Storage(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, json)
            .map_err(|e| WallError::Storage(format!("{}: {}", path.display(), e)))
    }
}

fn non_empty_parent(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

// =============================================================================
// TESTS
// =============================================================================
