//! Mock audio backend for testing.

use super::traits::{AudioBackend, PlaybackError};
use crate::protocol::SoundKey;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory backend recording every sound played
#[derive(Clone, Default)]
pub struct MockAudio {
    played: Arc<Mutex<Vec<SoundKey>>>,
    /// Keys that fail, with the error they fail with
    failures: Arc<Mutex<HashMap<SoundKey, PlaybackError>>>,
}

impl MockAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every play of `key` fail with a backend error
    pub fn fail_on(&self, key: SoundKey) {
        self.lock_failures().insert(
            key,
            PlaybackError::Backend(format!("{} sound failed to play", key)),
        );
    }

    /// Simulate a sound that never finished loading
    pub fn unload(&self, key: SoundKey) {
        self.lock_failures()
            .insert(key, PlaybackError::NotLoaded(key));
    }

    /// Sounds played successfully, in order
    pub fn played(&self) -> Vec<SoundKey> {
        self.played
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn lock_failures(&self) -> std::sync::MutexGuard<'_, HashMap<SoundKey, PlaybackError>> {
        self.failures.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AudioBackend for MockAudio {
    async fn play(&self, key: SoundKey) -> Result<(), PlaybackError> {
        if let Some(err) = self.lock_failures().get(&key) {
            return Err(err.clone());
        }
        self.played
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key);
        Ok(())
    }
}
