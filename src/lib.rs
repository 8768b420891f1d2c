//! Invisible Wall: hidden relationship-state engine and pacing simulator
//!
//! Core pipeline per conversational turn:
//! user text → EventClassifier → TransitionTable → TimingModel → reply
//! source → ControlProtocol → state-update directives.

pub mod core;
pub mod types;

// =============================================================================
// DIMENSION BOUNDS [C]
// =============================================================================

/// Lower bound for warmth (cold ↔ warm, signed)
pub const WARMTH_MIN: i64 = -5;

/// Upper bound for warmth
pub const WARMTH_MAX: i64 = 5;

/// Upper bound for the five unsigned dimensions (tension, trust,
/// disappointment, need, rhythm); lower bound is 0
pub const DIMENSION_MAX: i64 = 10;

// =============================================================================
// SPECIAL-STATE THRESHOLDS [C]
// =============================================================================

/// disappointment at or above this enters distancing mode
pub const DISTANCING_DISAPPOINTMENT: i64 = 7;

/// tension at or above this enters high alert
pub const HIGH_ALERT_TENSION: i64 = 8;

/// warmth at or below this enters cold mode
pub const COLD_MODE_WARMTH: i64 = -3;

// =============================================================================
// TIMING THRESHOLDS [C]
// =============================================================================

/// tension strictly above this makes timing fully unpredictable
/// (banded delay discarded, abort possible)
pub const TENSION_UNPREDICTABLE: i64 = 7;

/// tension strictly above this (up to the unpredictable threshold)
/// adds an extra hesitation delay
pub const TENSION_ELEVATED: i64 = 5;

/// Read-delay range for warmth > 3 (milliseconds)
pub const READ_DELAY_WARM_MS: (u64, u64) = (5_000, 30_000);

/// Read-delay range for 0 < warmth <= 3
pub const READ_DELAY_MILD_MS: (u64, u64) = (30_000, 120_000);

/// Read-delay range for warmth <= 0
pub const READ_DELAY_COLD_MS: (u64, u64) = (120_000, 300_000);

// =============================================================================
// MEMORY CAPS [C]
// =============================================================================

/// Retraction memory keeps only this many most-recent records
pub const RETRACTION_MEMORY_CAP: usize = 5;

/// Remembered retraction content is truncated to this many characters
pub const RETRACTION_CONTENT_CHARS: usize = 50;

/// A retracted message must have been visible at least this long
/// (milliseconds) to be noticed at all
pub const RETRACTION_VISIBLE_MIN_MS: u64 = 3_000;

/// History buffer keeps at most this many entries (oldest dropped first)
pub const HISTORY_CAP: usize = 40;

/// Number of most-recent history entries handed to the reply source
pub const HISTORY_CONTEXT_TURNS: usize = 20;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.3.0";
