//! Scores, history and transient selection of one session.

use crate::games::{resolve, Move};
use crate::protocol::{Outcome, RoundRecord, Selection, SessionId, SessionSnapshot};

/// Mutable aggregate owned by a single game session.
///
/// Invariants, after every call:
/// - `history[i].index == i + 1`
/// - `player_score + computer_score <= history.len()`, equal iff no draws
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    player_score: usize,
    computer_score: usize,
    history: Vec<RoundRecord>,
    selection: Selection,
    last_result_text: String,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a round and commit it: selection, score, history and result text
    pub fn apply_round(&mut self, player_move: Move, computer_move: Move) -> RoundRecord {
        let outcome = resolve(player_move, computer_move);

        self.selection = Selection::of(player_move, computer_move);

        match outcome {
            Outcome::PlayerWin => self.player_score += 1,
            Outcome::ComputerWin => self.computer_score += 1,
            Outcome::Draw => {}
        }

        let record = RoundRecord {
            index: self.history.len() + 1,
            player_move,
            computer_move,
            outcome,
        };
        self.last_result_text = record.summary();
        self.history.push(record.clone());

        record
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::none();
    }

    /// Back to the state of a freshly mounted session
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn player_score(&self) -> usize {
        self.player_score
    }

    pub fn computer_score(&self) -> usize {
        self.computer_score
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn last_result_text(&self) -> &str {
        &self.last_result_text
    }

    pub fn snapshot(&self, session_id: SessionId) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            player_score: self.player_score,
            computer_score: self.computer_score,
            history: self.history.clone(),
            selection: self.selection,
            last_result_text: self.last_result_text.clone(),
        }
    }
}
