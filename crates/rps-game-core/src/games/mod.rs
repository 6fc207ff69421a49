//! Game rules and opponent move generation.

mod opponent;
mod rps;

pub use opponent::{Opponent, RandomOpponent, ScriptedOpponent};
pub use rps::{resolve, Move};
