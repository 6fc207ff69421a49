//! Per-session game state and its state machine.

mod machine;
mod state;

pub use machine::{GameSession, Phase};
pub use state::SessionState;
