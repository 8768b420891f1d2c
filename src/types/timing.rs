//! Timing plan value object and warmth banding

use serde::{Deserialize, Serialize};

/// Named typing pace for a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Normal,
    Slow,
    Fast,
    Hesitant,
    Eager,
}

impl Pace {
    /// Parse a pace name from a control tag; unknown names are rejected
    pub fn parse(name: &str) -> Option<Pace> {
        match name {
            "normal" => Some(Pace::Normal),
            "slow" => Some(Pace::Slow),
            "fast" => Some(Pace::Fast),
            "hesitant" => Some(Pace::Hesitant),
            "eager" => Some(Pace::Eager),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pace::Normal => "normal",
            Pace::Slow => "slow",
            Pace::Fast => "fast",
            Pace::Hesitant => "hesitant",
            Pace::Eager => "eager",
        }
    }
}

impl std::fmt::Display for Pace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Warmth banding used by the timing model and style hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarmthBand {
    /// warmth <= -3
    Freezing,
    /// -3 < warmth <= -1
    Cold,
    /// -1 < warmth <= 1
    Neutral,
    /// 1 < warmth <= 3
    Warm,
    /// warmth > 3
    Caring,
}

impl WarmthBand {
    /// Band membership for a (clamped) warmth value
    pub fn from_warmth(warmth: i64) -> WarmthBand {
        if warmth <= -3 {
            WarmthBand::Freezing
        } else if warmth <= -1 {
            WarmthBand::Cold
        } else if warmth <= 1 {
            WarmthBand::Neutral
        } else if warmth <= 3 {
            WarmthBand::Warm
        } else {
            WarmthBand::Caring
        }
    }
}

/// Base timing ranges for one warmth band (milliseconds)
#[derive(Debug, Clone, Copy)]
pub struct BandTiming {
    /// Typing-delay range before the first character appears
    pub delay_ms: (u64, u64),
    /// Per-character pace range
    pub pace_ms: (u64, u64),
    /// Named pace of the band
    pub pace: Pace,
}

impl WarmthBand {
    /// Immutable band table. The lowest band is fast-but-dismissive:
    /// a long wait, then a curt reply typed quickly.
    pub fn timing(&self) -> BandTiming {
        match self {
            WarmthBand::Freezing => BandTiming {
                delay_ms: (8_000, 15_000),
                pace_ms: (30, 50),
                pace: Pace::Fast,
            },
            WarmthBand::Cold => BandTiming {
                delay_ms: (5_000, 10_000),
                pace_ms: (60, 80),
                pace: Pace::Normal,
            },
            WarmthBand::Neutral => BandTiming {
                delay_ms: (4_000, 8_000),
                pace_ms: (70, 90),
                pace: Pace::Normal,
            },
            WarmthBand::Warm => BandTiming {
                delay_ms: (2_000, 4_000),
                pace_ms: (60, 80),
                pace: Pace::Normal,
            },
            WarmthBand::Caring => BandTiming {
                delay_ms: (1_000, 2_000),
                pace_ms: (50, 70),
                pace: Pace::Eager,
            },
        }
    }
}

/// One turn's timing decision. Produced fresh per turn, never mutated
/// after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingPlan {
    /// Delay before the typing indicator appears and typing starts
    pub typing_delay_ms: u64,
    /// Delay before the message is even read
    pub read_delay_ms: u64,
    /// Simulated milliseconds per typed character
    pub pace_ms_per_char: u64,
    /// Named pace, for display and control-tag overrides
    pub pace: Pace,
    /// Whether the reply may be aborted mid-typing
    pub may_abort: bool,
    /// Whether a reply happens at all
    pub should_reply: bool,
}

impl Default for TimingPlan {
    fn default() -> Self {
        Self {
            typing_delay_ms: 0,
            read_delay_ms: 0,
            pace_ms_per_char: 80,
            pace: Pace::Normal,
            may_abort: false,
            should_reply: true,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(WarmthBand::from_warmth(-5), WarmthBand::Freezing);
        assert_eq!(WarmthBand::from_warmth(-3), WarmthBand::Freezing);
        assert_eq!(WarmthBand::from_warmth(-2), WarmthBand::Cold);
        assert_eq!(WarmthBand::from_warmth(-1), WarmthBand::Cold);
        assert_eq!(WarmthBand::from_warmth(0), WarmthBand::Neutral);
        assert_eq!(WarmthBand::from_warmth(1), WarmthBand::Neutral);
        assert_eq!(WarmthBand::from_warmth(2), WarmthBand::Warm);
        assert_eq!(WarmthBand::from_warmth(3), WarmthBand::Warm);
        assert_eq!(WarmthBand::from_warmth(4), WarmthBand::Caring);
        assert_eq!(WarmthBand::from_warmth(5), WarmthBand::Caring);
    }

    #[test]
    fn test_delay_shrinks_as_warmth_rises() {
        // Above the dismissive bottom band, warmer means faster
        let cold = WarmthBand::Cold.timing();
        let neutral = WarmthBand::Neutral.timing();
        let warm = WarmthBand::Warm.timing();
        let caring = WarmthBand::Caring.timing();
        assert!(cold.delay_ms.0 >= neutral.delay_ms.0 || cold.delay_ms.1 >= neutral.delay_ms.1);
        assert!(neutral.delay_ms.1 > warm.delay_ms.1);
        assert!(warm.delay_ms.1 > caring.delay_ms.1);
    }

    #[test]
    fn test_pace_parse() {
        assert_eq!(Pace::parse("hesitant"), Some(Pace::Hesitant));
        assert_eq!(Pace::parse("chaotic"), None);
    }

    #[test]
    fn test_plan_defaults() {
        let plan = TimingPlan::default();
        assert!(plan.should_reply);
        assert!(!plan.may_abort);
        assert_eq!(plan.pace_ms_per_char, 80);
    }
}
