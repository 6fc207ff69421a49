//! Service configuration from environment variables.

use rps_game_core::SessionConfig;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "static";

/// Settings read once at startup
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    pub port: u16,
    pub static_dir: String,
    pub session: SessionConfig,
}

impl PlayerConfig {
    /// Read `PORT`, `RPS_STATIC_DIR`, `RPS_CLEAR_DELAY_MS` and `RPS_SEED`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut session = SessionConfig::default();
        if let Some(ms) = parse_var::<u64>(&lookup, "RPS_CLEAR_DELAY_MS") {
            session = session.with_clear_delay(Duration::from_millis(ms));
        }
        if let Some(seed) = parse_var::<u64>(&lookup, "RPS_SEED") {
            session = session.with_seed(seed);
        }

        Self {
            port: parse_var(&lookup, "PORT").unwrap_or(DEFAULT_PORT),
            static_dir: lookup("RPS_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            session,
        }
    }
}

/// Parse a variable, ignoring it with a warning when malformed
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}
