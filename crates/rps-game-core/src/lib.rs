//! RPS Game Core Library
//!
//! This crate provides the round resolution rules, the per-session state
//! machine, and the feedback events consumed by presentation layers
//! (sound playback and move animations).

pub mod audio;
pub mod config;
pub mod error;
pub mod feedback;
pub mod games;
pub mod protocol;
pub mod session;

pub use audio::{AudioBackend, LogAudio, MockAudio, PlaybackError};
pub use config::SessionConfig;
pub use error::{GameError, InvalidMoveError};
pub use feedback::{FeedbackDispatcher, FeedbackEvent, PlaybackFailure};
pub use games::{resolve, Move, Opponent, RandomOpponent, ScriptedOpponent};
pub use protocol::{
    Outcome, RoundFeedback, RoundRecord, Selection, SessionId, SessionSnapshot, SoundKey,
};
pub use session::{GameSession, Phase, SessionState};
