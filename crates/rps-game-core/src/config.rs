//! Session configuration.

use crate::games::RandomOpponent;
use std::time::Duration;

/// How long a submitted round stays highlighted
pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_millis(1000);

/// Per-subscriber buffer of feedback events
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Tunables for one game session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Delay before the transient selection is cleared
    pub clear_delay: Duration,
    /// Seed for the random opponent; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub event_capacity: usize,
}

impl SessionConfig {
    pub fn with_clear_delay(mut self, clear_delay: Duration) -> Self {
        self.clear_delay = clear_delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_event_capacity(mut self, event_capacity: usize) -> Self {
        self.event_capacity = event_capacity;
        self
    }

    /// Build the opponent this configuration describes
    pub fn opponent(&self) -> RandomOpponent {
        match self.seed {
            Some(seed) => RandomOpponent::seeded(seed),
            None => RandomOpponent::new(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clear_delay: DEFAULT_CLEAR_DELAY,
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}
