//! Core types for the Invisible Wall engine

mod directives;
mod error;
mod event;
mod state;
mod timing;

pub use directives::ControlDirectives;
pub use error::WallError;
pub use event::{ApplyOutcome, EventCategory, EventKind, SpecialState};
pub use state::{Dimension, EmotionalState, RetractionRecord};
pub use timing::{BandTiming, Pace, TimingPlan, WarmthBand};
