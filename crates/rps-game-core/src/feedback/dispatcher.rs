//! Fire-and-forget delivery of feedback events.

use crate::audio::{AudioBackend, PlaybackError};
use crate::config::DEFAULT_EVENT_CAPACITY;
use crate::games::Move;
use crate::protocol::{RoundFeedback, SoundKey};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use tokio::sync::{broadcast, mpsc};

/// Something the presentation layer should react to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FeedbackEvent {
    /// Play a sound
    Sound(SoundKey),
    /// Play the attention animation on a move
    Pulse(Move),
    /// The transient selection was cleared by its timer
    SelectionCleared,
}

/// A sound that failed to play
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackFailure {
    pub key: SoundKey,
    pub error: PlaybackError,
}

/// Broadcasts feedback events and drives optional audio playback.
///
/// Nothing here reports back into game state. Missing or lagging subscribers
/// are ignored and failed sounds only reach the log and the error channel.
/// Sounds are played one at a time, in the order they were emitted.
#[derive(Clone)]
pub struct FeedbackDispatcher {
    events: broadcast::Sender<FeedbackEvent>,
    audio: Option<Arc<dyn AudioBackend>>,
    errors: Option<mpsc::UnboundedSender<PlaybackFailure>>,
    /// Queue of the playback worker, started on the first sound
    playback: Arc<OnceLock<mpsc::UnboundedSender<SoundKey>>>,
}

impl FeedbackDispatcher {
    /// Create a dispatcher buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            events,
            audio: None,
            errors: None,
            playback: Arc::new(OnceLock::new()),
        }
    }

    /// Play sound events through this backend
    pub fn with_audio(mut self, audio: Arc<dyn AudioBackend>) -> Self {
        self.audio = Some(audio);
        self.playback = Arc::new(OnceLock::new());
        self
    }

    /// Report playback failures on this channel
    pub fn with_error_channel(mut self, errors: mpsc::UnboundedSender<PlaybackFailure>) -> Self {
        self.errors = Some(errors);
        self.playback = Arc::new(OnceLock::new());
        self
    }

    /// Observe all events emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<FeedbackEvent> {
        self.events.subscribe()
    }

    /// Emit one event without waiting on any consumer.
    ///
    /// Sounds are queued for the playback worker, which is spawned onto the
    /// current tokio runtime the first time a sound is emitted.
    pub fn emit(&self, event: FeedbackEvent) {
        // Err only means nobody is listening right now
        let _ = self.events.send(event);

        if let (FeedbackEvent::Sound(key), Some(audio)) = (event, &self.audio) {
            let queue = self
                .playback
                .get_or_init(|| spawn_playback_worker(Arc::clone(audio), self.errors.clone()));
            if queue.send(key).is_err() {
                tracing::warn!(sound = %key, "playback worker is gone");
            }
        }
    }

    /// Emit the outcome sound followed by one pulse per animated move
    pub fn emit_round(&self, feedback: &RoundFeedback) {
        self.emit(FeedbackEvent::Sound(feedback.sound_key));
        for m in &feedback.animated_moves {
            self.emit(FeedbackEvent::Pulse(*m));
        }
    }
}

/// Play queued sounds one after another until every dispatcher clone is dropped
fn spawn_playback_worker(
    audio: Arc<dyn AudioBackend>,
    errors: Option<mpsc::UnboundedSender<PlaybackFailure>>,
) -> mpsc::UnboundedSender<SoundKey> {
    let (tx, mut rx) = mpsc::unbounded_channel::<SoundKey>();
    tokio::spawn(async move {
        while let Some(key) = rx.recv().await {
            if let Err(error) = audio.play(key).await {
                tracing::warn!(sound = %key, %error, "sound failed to play");
                if let Some(errors) = &errors {
                    let _ = errors.send(PlaybackFailure { key, error });
                }
            }
        }
    });
    tx
}

impl Default for FeedbackDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
