//! Audio backend trait definition.

use crate::protocol::SoundKey;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from sound playback
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("Sound not loaded: {0}")]
    NotLoaded(SoundKey),

    #[error("Playback failed: {0}")]
    Backend(String),
}

/// Trait for the audio subsystem
///
/// The backend is loaded once at startup and released at teardown by its
/// owner; the game core only references sounds by `SoundKey`.
/// Implementations can be:
/// - MockAudio for testing
/// - LogAudio for headless services
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Play a sound from the beginning
    async fn play(&self, key: SoundKey) -> Result<(), PlaybackError>;
}
