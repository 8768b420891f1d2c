//! Core engine components

pub mod classifier;
pub mod control;
pub mod session;
pub mod store;
pub mod style;
pub mod timing;
pub mod transition;

pub use classifier::EventClassifier;
pub use control::ControlProtocol;
pub use session::{
    GeneratorError, HistoryBuffer, HistoryEntry, ReplySource, Role, Session, TurnOutcome,
    FILLER_REPLY,
};
pub use store::StateStore;
pub use style::{response_style, temperature_display, ResponseStyle};
pub use timing::TimingModel;
pub use transition::TransitionTable;
