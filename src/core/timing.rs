//! TimingModel: state + event category → randomized, bounded timing plan
//!
//! Read-only with respect to state, but every call consumes randomness.
//! The RNG is owned and seedable so tests can pin exact draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::types::{EmotionalState, EventCategory, Pace, TimingPlan, WarmthBand};
use crate::{
    READ_DELAY_COLD_MS, READ_DELAY_MILD_MS, READ_DELAY_WARM_MS, TENSION_ELEVATED,
    TENSION_UNPREDICTABLE,
};

/// Randomized timing calculator
#[derive(Debug)]
pub struct TimingModel {
    rng: ChaCha8Rng,
}

impl Default for TimingModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingModel {
    /// Create a model seeded from entropy
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create a model with a fixed seed for reproducible plans
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Compute one timing plan for a turn
    pub fn calculate(&mut self, state: &EmotionalState, event: EventCategory) -> TimingPlan {
        let warmth = state.warmth;
        let tension = state.tension;

        let mut plan = TimingPlan::default();

        // 1. Warmth-banded base delay and pace
        let band = WarmthBand::from_warmth(warmth);
        let base = band.timing();
        let mut typing_delay = self.draw(base.delay_ms);
        plan.pace_ms_per_char = self.draw(base.pace_ms);
        plan.pace = base.pace;

        // 2. Event-specific offsets and overrides
        match event {
            EventCategory::Retraction => {
                typing_delay += self.draw((10_000, 20_000));
                plan.pace = Pace::Slow;
                plan.pace_ms_per_char = self.draw((120, 180));
                if tension > TENSION_ELEVATED {
                    plan.may_abort = self.rng.gen_bool(0.3);
                }
            }
            EventCategory::Confession => {
                typing_delay += self.draw((15_000, 30_000));
                plan.pace = Pace::Slow;
                plan.pace_ms_per_char = self.draw((150, 200));
                if warmth < 2 {
                    plan.may_abort = self.rng.gen_bool(0.5);
                    plan.should_reply = self.rng.gen_bool(0.7);
                }
            }
            EventCategory::Ambiguous => {
                typing_delay += self.draw((5_000, 10_000));
                plan.pace = Pace::Hesitant;
                plan.pace_ms_per_char = self.draw((100, 150));
            }
            EventCategory::Question => {
                typing_delay += self.draw((2_000, 3_000));
            }
            EventCategory::Silence => {
                // Nothing to read, nothing to type
                typing_delay = 0;
                plan.should_reply = false;
            }
            EventCategory::Normal => {}
        }

        // 3. Tension modifiers; above the unpredictable threshold the
        // banded values are discarded entirely
        if tension > TENSION_UNPREDICTABLE {
            typing_delay = self.draw((2_000, 30_000));
            plan.pace_ms_per_char = self.draw((50, 200));
            plan.may_abort = self.rng.gen_bool(0.2);
        } else if tension > TENSION_ELEVATED {
            typing_delay += self.draw((3_000, 8_000));
        }

        plan.typing_delay_ms = typing_delay;

        // 4. Read delay, banded on warmth independently of typing delay
        plan.read_delay_ms = if warmth > 3 {
            self.draw(READ_DELAY_WARM_MS)
        } else if warmth > 0 {
            self.draw(READ_DELAY_MILD_MS)
        } else {
            self.draw(READ_DELAY_COLD_MS)
        };

        trace!(
            ?event,
            warmth,
            tension,
            typing_delay_ms = plan.typing_delay_ms,
            should_reply = plan.should_reply,
            "timing plan computed"
        );

        plan
    }

    /// One uniform draw within inclusive bounds
    fn draw(&mut self, range: (u64, u64)) -> u64 {
        self.rng.gen_range(range.0..=range.1)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(warmth: i64, tension: i64) -> EmotionalState {
        let mut state = EmotionalState {
            warmth,
            tension,
            ..Default::default()
        };
        state.clamp();
        state
    }

    #[test]
    fn test_seeded_model_is_reproducible() {
        let state = state_with(1, 3);

        let mut a = TimingModel::with_seed(42);
        let mut b = TimingModel::with_seed(42);

        for event in [
            EventCategory::Normal,
            EventCategory::Ambiguous,
            EventCategory::Confession,
            EventCategory::Retraction,
        ] {
            let pa = a.calculate(&state, event);
            let pb = b.calculate(&state, event);
            assert_eq!(pa.typing_delay_ms, pb.typing_delay_ms);
            assert_eq!(pa.read_delay_ms, pb.read_delay_ms);
            assert_eq!(pa.pace_ms_per_char, pb.pace_ms_per_char);
            assert_eq!(pa.may_abort, pb.may_abort);
            assert_eq!(pa.should_reply, pb.should_reply);
        }
    }

    #[test]
    fn test_normal_bounds_per_band() {
        let mut model = TimingModel::with_seed(7);

        let cases = [
            (-5, 8_000, 15_000, 30, 50),
            (-2, 5_000, 10_000, 60, 80),
            (0, 4_000, 8_000, 70, 90),
            (2, 2_000, 4_000, 60, 80),
            (5, 1_000, 2_000, 50, 70),
        ];

        for (warmth, dmin, dmax, pmin, pmax) in cases {
            let state = state_with(warmth, 0);
            for _ in 0..20 {
                let plan = model.calculate(&state, EventCategory::Normal);
                assert!(
                    plan.typing_delay_ms >= dmin && plan.typing_delay_ms <= dmax,
                    "warmth {} delay {} outside [{}, {}]",
                    warmth,
                    plan.typing_delay_ms,
                    dmin,
                    dmax
                );
                assert!(plan.pace_ms_per_char >= pmin && plan.pace_ms_per_char <= pmax);
                assert!(plan.should_reply);
                assert!(!plan.may_abort);
            }
        }
    }

    #[test]
    fn test_confession_low_warmth_band_floor() {
        let mut model = TimingModel::with_seed(11);
        let state = state_with(0, 5);

        for _ in 0..50 {
            let plan = model.calculate(&state, EventCategory::Confession);
            // Banded base (>= 4000) + confession offset (>= 15000)
            assert!(plan.typing_delay_ms >= 15_000);
            assert_eq!(plan.pace, Pace::Slow);
            assert!(plan.pace_ms_per_char >= 150 && plan.pace_ms_per_char <= 200);
        }
    }

    #[test]
    fn test_confession_warm_never_withholds_reply() {
        let mut model = TimingModel::with_seed(13);
        let state = state_with(4, 0);

        for _ in 0..50 {
            let plan = model.calculate(&state, EventCategory::Confession);
            assert!(plan.should_reply);
            assert!(!plan.may_abort);
        }
    }

    #[test]
    fn test_confession_cold_can_withhold_reply() {
        let mut model = TimingModel::with_seed(17);
        let state = state_with(-2, 0);

        let mut withheld = 0;
        for _ in 0..200 {
            let plan = model.calculate(&state, EventCategory::Confession);
            if !plan.should_reply {
                withheld += 1;
            }
        }
        // should_reply true w.p. 0.7 → roughly 60 withheld out of 200
        assert!(withheld > 20, "expected some withheld replies, got {}", withheld);
    }

    #[test]
    fn test_retraction_offsets() {
        let mut model = TimingModel::with_seed(19);
        let state = state_with(0, 0);

        for _ in 0..50 {
            let plan = model.calculate(&state, EventCategory::Retraction);
            // Base 4000..8000 + 10000..20000
            assert!(plan.typing_delay_ms >= 14_000 && plan.typing_delay_ms <= 28_000);
            assert!(plan.pace_ms_per_char >= 120 && plan.pace_ms_per_char <= 180);
            // Abort only possible above elevated tension
            assert!(!plan.may_abort);
        }
    }

    #[test]
    fn test_high_tension_override_supersedes_bands() {
        let mut model = TimingModel::with_seed(23);
        let state = state_with(5, 9);

        for _ in 0..50 {
            let plan = model.calculate(&state, EventCategory::Normal);
            assert!(plan.typing_delay_ms >= 2_000 && plan.typing_delay_ms <= 30_000);
            assert!(plan.pace_ms_per_char >= 50 && plan.pace_ms_per_char <= 200);
        }
    }

    #[test]
    fn test_silence_never_replies() {
        let mut model = TimingModel::with_seed(29);
        let state = state_with(3, 0);

        let plan = model.calculate(&state, EventCategory::Silence);
        assert!(!plan.should_reply);
        assert_eq!(plan.typing_delay_ms, 0);
    }

    #[test]
    fn test_read_delay_bands() {
        let mut model = TimingModel::with_seed(31);

        let warm = model.calculate(&state_with(5, 0), EventCategory::Normal);
        assert!(warm.read_delay_ms >= 5_000 && warm.read_delay_ms <= 30_000);

        let mild = model.calculate(&state_with(2, 0), EventCategory::Normal);
        assert!(mild.read_delay_ms >= 30_000 && mild.read_delay_ms <= 120_000);

        let cold = model.calculate(&state_with(-1, 0), EventCategory::Normal);
        assert!(cold.read_delay_ms >= 120_000 && cold.read_delay_ms <= 300_000);
    }
}
