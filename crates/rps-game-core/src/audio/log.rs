//! Headless backend that only logs.

use super::traits::{AudioBackend, PlaybackError};
use crate::protocol::SoundKey;
use async_trait::async_trait;

/// Backend that records playback requests in the log
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAudio;

#[async_trait]
impl AudioBackend for LogAudio {
    async fn play(&self, key: SoundKey) -> Result<(), PlaybackError> {
        tracing::info!(sound = %key, asset = key.asset(), "play sound");
        Ok(())
    }
}
