//! Values handed to the presentation layer.

use crate::games::Move;
use crate::protocol::{RoundRecord, Selection, SessionId, SoundKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of one `submit_move` call
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundFeedback {
    pub record: RoundRecord,
    pub result_text: String,
    /// Outcome sound; the click that precedes every round is emitted separately
    pub sound_key: SoundKey,
    /// Distinct moves played this round, one or two of them
    pub animated_moves: BTreeSet<Move>,
}

/// Read-only view of a session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub player_score: usize,
    pub computer_score: usize,
    pub history: Vec<RoundRecord>,
    pub selection: Selection,
    pub last_result_text: String,
}
