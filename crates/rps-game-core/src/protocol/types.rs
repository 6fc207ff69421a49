//! Protocol types.

use crate::games::Move;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier of one mounted game session
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Round outcome, from the player's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PlayerWin,
    ComputerWin,
    Draw,
}

impl Outcome {
    /// Short sentence shown after the moves
    pub fn headline(&self) -> &'static str {
        match self {
            Outcome::PlayerWin => "You Win!",
            Outcome::ComputerWin => "Computer Wins!",
            Outcome::Draw => "It's a Draw!",
        }
    }

    /// Sound played once the round is resolved
    pub fn sound_key(&self) -> SoundKey {
        match self {
            Outcome::PlayerWin => SoundKey::Win,
            Outcome::ComputerWin => SoundKey::Lose,
            Outcome::Draw => SoundKey::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// Symbolic feedback sound
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundKey {
    Click,
    Win,
    Lose,
    Draw,
}

impl SoundKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKey::Click => "click",
            SoundKey::Win => "win",
            SoundKey::Lose => "lose",
            SoundKey::Draw => "draw",
        }
    }

    /// Asset file a playback backend loads for this key
    pub fn asset(&self) -> &'static str {
        match self {
            SoundKey::Click => "button-09a.mp3",
            SoundKey::Win => "applause-2.mp3",
            SoundKey::Lose => "button-2.mp3",
            SoundKey::Draw => "beep-05.mp3",
        }
    }
}

impl fmt::Display for SoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved round. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based position in the session history
    pub index: usize,
    pub player_move: Move,
    pub computer_move: Move,
    pub outcome: Outcome,
}

impl RoundRecord {
    /// "You chose rock, Computer chose scissors. You Win!"
    pub fn summary(&self) -> String {
        format!(
            "You chose {}, Computer chose {}. {}",
            self.player_move,
            self.computer_move,
            self.outcome.headline()
        )
    }
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Round {}: {}", self.index, self.summary())
    }
}

/// Moves currently highlighted by the presentation layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub player: Option<Move>,
    pub computer: Option<Move>,
}

impl Selection {
    /// Nothing selected
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(player: Move, computer: Move) -> Self {
        Self {
            player: Some(player),
            computer: Some(computer),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.player.is_none() && self.computer.is_none()
    }

    /// Whether either side picked this move
    pub fn contains(&self, m: Move) -> bool {
        self.player == Some(m) || self.computer == Some(m)
    }
}
