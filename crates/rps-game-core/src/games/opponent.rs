//! Computer opponent move generation.

use super::Move;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of computer moves
pub trait Opponent: Send {
    /// Produce the computer's move for the next round
    fn next_move(&mut self) -> Move;
}

/// Memoryless opponent drawing uniformly from the three moves
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    /// Create an opponent seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an opponent with a reproducible move stream
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn next_move(&mut self) -> Move {
        Move::ALL[self.rng.gen_range(0..Move::ALL.len())]
    }
}

/// Opponent replaying a fixed cycle of moves
#[derive(Clone, Debug)]
pub struct ScriptedOpponent {
    moves: Vec<Move>,
    cursor: usize,
}

impl ScriptedOpponent {
    /// Create from a script. An empty script plays rock forever.
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        let mut moves: Vec<Move> = moves.into_iter().collect();
        if moves.is_empty() {
            moves.push(Move::Rock);
        }
        Self { moves, cursor: 0 }
    }
}

impl Opponent for ScriptedOpponent {
    fn next_move(&mut self) -> Move {
        let m = self.moves[self.cursor % self.moves.len()];
        self.cursor += 1;
        m
    }
}
