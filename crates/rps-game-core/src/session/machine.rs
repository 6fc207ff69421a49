//! Session state machine: rounds, reset, and the timed selection clear.

use super::state::SessionState;
use crate::config::SessionConfig;
use crate::error::GameError;
use crate::feedback::{FeedbackDispatcher, FeedbackEvent};
use crate::games::{Move, Opponent};
use crate::protocol::{
    RoundFeedback, RoundRecord, Selection, SessionId, SessionSnapshot, SoundKey,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Whether a round is currently highlighted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No transient selection
    Idle,
    /// Selection visible, clear timer armed
    Displaying,
}

struct SessionInner {
    state: SessionState,
    opponent: Box<dyn Opponent>,
    /// At most one armed selection clear
    pending_clear: Option<JoinHandle<()>>,
}

impl SessionInner {
    fn cancel_pending_clear(&mut self) -> bool {
        match self.pending_clear.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

/// One play session.
///
/// Every mutation goes through a single async mutex, so concurrent callers
/// are serialized. The selection-clear task takes the same mutex; a clear
/// that has been aborted while waiting for it never runs.
pub struct GameSession {
    id: SessionId,
    config: SessionConfig,
    inner: Arc<Mutex<SessionInner>>,
    feedback: FeedbackDispatcher,
}

impl GameSession {
    pub fn new(
        config: SessionConfig,
        opponent: impl Opponent + 'static,
        feedback: FeedbackDispatcher,
    ) -> Self {
        let id = SessionId::new();
        debug!(
            session = %id,
            clear_delay_ms = config.clear_delay.as_millis() as u64,
            "session created"
        );
        Self {
            id,
            config,
            inner: Arc::new(Mutex::new(SessionInner {
                state: SessionState::new(),
                opponent: Box::new(opponent),
                pending_clear: None,
            })),
            feedback,
        }
    }

    /// Session with a random opponent and a dispatcher without audio
    pub fn from_config(config: SessionConfig) -> Self {
        let opponent = config.opponent();
        let feedback = FeedbackDispatcher::new(config.event_capacity);
        Self::new(config, opponent, feedback)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn feedback(&self) -> &FeedbackDispatcher {
        &self.feedback
    }

    /// Play one round against the opponent
    pub async fn submit_move(&self, player_move: Move) -> RoundFeedback {
        self.feedback.emit(FeedbackEvent::Sound(SoundKey::Click));

        let mut inner = self.inner.lock().await;
        let computer_move = inner.opponent.next_move();
        let record = inner.state.apply_round(player_move, computer_move);
        let feedback = round_feedback(record);

        debug!(
            session = %self.id,
            round = feedback.record.index,
            player = %player_move,
            computer = %computer_move,
            outcome = ?feedback.record.outcome,
            "round resolved"
        );

        self.arm_clear(&mut inner);
        self.feedback.emit_round(&feedback);

        feedback
    }

    /// Parse textual input and play it. Invalid input leaves the session untouched.
    pub async fn submit_input(&self, input: &str) -> Result<RoundFeedback, GameError> {
        let player_move: Move = input.parse()?;
        Ok(self.submit_move(player_move).await)
    }

    /// Zero scores, clear history and selection, cancel any pending clear
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.cancel_pending_clear();
        inner.state.reset();
        debug!(session = %self.id, "session reset");

        self.feedback.emit(FeedbackEvent::Sound(SoundKey::Click));
    }

    /// Tear down the session, cancelling any pending clear
    pub async fn dispose(self) {
        let mut inner = self.inner.lock().await;
        inner.cancel_pending_clear();
        debug!(session = %self.id, rounds = inner.state.history().len(), "session disposed");
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.state.snapshot(self.id)
    }

    pub async fn selection(&self) -> Selection {
        self.inner.lock().await.state.selection()
    }

    pub async fn player_score(&self) -> usize {
        self.inner.lock().await.state.player_score()
    }

    pub async fn computer_score(&self) -> usize {
        self.inner.lock().await.state.computer_score()
    }

    pub async fn history(&self) -> Vec<RoundRecord> {
        self.inner.lock().await.state.history().to_vec()
    }

    pub async fn last_result_text(&self) -> String {
        self.inner.lock().await.state.last_result_text().to_string()
    }

    pub async fn phase(&self) -> Phase {
        if self.inner.lock().await.pending_clear.is_some() {
            Phase::Displaying
        } else {
            Phase::Idle
        }
    }

    /// Cancel any armed clear and schedule a fresh one
    fn arm_clear(&self, inner: &mut SessionInner) {
        if inner.cancel_pending_clear() {
            debug!(session = %self.id, "pending selection clear superseded");
        }

        let session = Arc::downgrade(&self.inner);
        let delay = self.config.clear_delay;
        let feedback = self.feedback.clone();
        let id = self.id;

        inner.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            clear_selection(session, feedback, id).await;
        }));
    }
}

async fn clear_selection(
    session: Weak<Mutex<SessionInner>>,
    feedback: FeedbackDispatcher,
    id: SessionId,
) {
    // Session dropped without dispose
    let Some(session) = session.upgrade() else {
        return;
    };

    let mut inner = session.lock().await;
    inner.state.clear_selection();
    // Drops our own handle; the task keeps running to completion
    inner.pending_clear = None;
    debug!(session = %id, "selection cleared");

    feedback.emit(FeedbackEvent::SelectionCleared);
}

fn round_feedback(record: RoundRecord) -> RoundFeedback {
    RoundFeedback {
        result_text: record.summary(),
        sound_key: record.outcome.sound_key(),
        animated_moves: BTreeSet::from([record.player_move, record.computer_move]),
        record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MockAudio;
    use crate::games::ScriptedOpponent;
    use crate::protocol::Outcome;
    use std::time::Duration;
    use tokio::sync::broadcast;
    use tokio::time::sleep;

    fn scripted(moves: impl IntoIterator<Item = Move>) -> GameSession {
        GameSession::new(
            SessionConfig::default(),
            ScriptedOpponent::new(moves),
            FeedbackDispatcher::new(64),
        )
    }

    fn drain(rx: &mut broadcast::Receiver<FeedbackEvent>) -> Vec<FeedbackEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn clears(events: &[FeedbackEvent]) -> usize {
        events
            .iter()
            .filter(|e| **e == FeedbackEvent::SelectionCleared)
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_move_player_wins() {
        let session = scripted([Move::Scissors]);

        let feedback = session.submit_move(Move::Rock).await;

        assert_eq!(feedback.record.outcome, Outcome::PlayerWin);
        assert_eq!(feedback.sound_key, SoundKey::Win);
        assert_eq!(
            feedback.animated_moves,
            BTreeSet::from([Move::Rock, Move::Scissors])
        );
        assert_eq!(
            feedback.result_text,
            "You chose rock, Computer chose scissors. You Win!"
        );
        assert_eq!(session.player_score().await, 1);
        assert_eq!(session.computer_score().await, 0);
        assert_eq!(session.last_result_text().await, feedback.result_text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_emits_click_then_outcome() {
        let session = scripted([Move::Paper]);
        let mut rx = session.feedback().subscribe();

        session.submit_move(Move::Rock).await;

        assert_eq!(
            drain(&mut rx),
            vec![
                FeedbackEvent::Sound(SoundKey::Click),
                FeedbackEvent::Sound(SoundKey::Lose),
                FeedbackEvent::Pulse(Move::Rock),
                FeedbackEvent::Pulse(Move::Paper),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_clears_after_delay() {
        let session = scripted([Move::Scissors]);
        let mut rx = session.feedback().subscribe();

        session.submit_move(Move::Rock).await;
        assert_eq!(
            session.selection().await,
            Selection::of(Move::Rock, Move::Scissors)
        );
        assert_eq!(session.phase().await, Phase::Displaying);

        sleep(Duration::from_millis(999)).await;
        assert!(!session.selection().await.is_empty());

        sleep(Duration::from_millis(2)).await;
        assert!(session.selection().await.is_empty());
        assert_eq!(session.phase().await, Phase::Idle);
        assert_eq!(clears(&drain(&mut rx)), 1);

        // Round data survives the clear
        assert_eq!(session.history().await.len(), 1);
        assert_eq!(session.player_score().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_rounds_reschedule_clear() {
        let session = scripted([Move::Paper, Move::Scissors]);
        let mut rx = session.feedback().subscribe();

        session.submit_move(Move::Rock).await;
        sleep(Duration::from_millis(500)).await;
        session.submit_move(Move::Paper).await;

        // First round's clear would have fired at 1000ms
        sleep(Duration::from_millis(600)).await;
        assert_eq!(
            session.selection().await,
            Selection::of(Move::Paper, Move::Scissors)
        );
        assert_eq!(clears(&drain(&mut rx)), 0);

        sleep(Duration::from_millis(401)).await;
        assert!(session.selection().await.is_empty());
        assert_eq!(clears(&drain(&mut rx)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_clear() {
        let session = scripted([Move::Rock]);

        session.submit_move(Move::Paper).await;
        let mut rx = session.feedback().subscribe();
        session.reset().await;

        assert!(session.selection().await.is_empty());
        assert_eq!(session.phase().await, Phase::Idle);

        sleep(Duration::from_millis(1500)).await;
        let events = drain(&mut rx);
        assert_eq!(events, vec![FeedbackEvent::Sound(SoundKey::Click)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_after_reset_starts_at_one() {
        let session = scripted([Move::Rock, Move::Paper]);

        session.submit_move(Move::Paper).await;
        session.reset().await;
        let feedback = session.submit_move(Move::Scissors).await;

        assert_eq!(feedback.record.index, 1);
        assert_eq!(feedback.record.outcome, Outcome::PlayerWin);
        assert_eq!(session.history().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_input_leaves_state_untouched() {
        let session = scripted([Move::Rock]);
        let mut rx = session.feedback().subscribe();

        let result = session.submit_input("spock").await;

        assert!(matches!(result, Err(GameError::InvalidMove(_))));
        assert_eq!(session.snapshot().await.history.len(), 0);
        assert_eq!(session.phase().await, Phase::Idle);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_input_is_played() {
        let session = scripted([Move::Rock]);

        let feedback = session.submit_input("Paper").await.unwrap();

        assert_eq!(feedback.record.player_move, Move::Paper);
        assert_eq!(feedback.record.outcome, Outcome::PlayerWin);
    }

    #[tokio::test(start_paused = true)]
    async fn test_playback_failure_does_not_roll_back() {
        let audio = MockAudio::new();
        audio.fail_on(SoundKey::Click);
        audio.fail_on(SoundKey::Lose);
        let (tx, mut errors) = tokio::sync::mpsc::unbounded_channel();
        let dispatcher = FeedbackDispatcher::new(64)
            .with_audio(Arc::new(audio))
            .with_error_channel(tx);
        let session = GameSession::new(
            SessionConfig::default(),
            ScriptedOpponent::new([Move::Rock]),
            dispatcher,
        );

        let feedback = session.submit_move(Move::Scissors).await;

        assert_eq!(feedback.record.outcome, Outcome::ComputerWin);
        assert_eq!(session.computer_score().await, 1);

        let mut failed = vec![
            errors.recv().await.unwrap().key,
            errors.recv().await.unwrap().key,
        ];
        failed.sort_by_key(|k| k.as_str());
        assert_eq!(failed, vec![SoundKey::Click, SoundKey::Lose]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_pending_clear() {
        let session = scripted([Move::Rock]);
        let mut rx = session.feedback().subscribe();

        session.submit_move(Move::Rock).await;
        session.dispose().await;

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(clears(&drain(&mut rx)), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_clear_delay() {
        let session = GameSession::new(
            SessionConfig::default().with_clear_delay(Duration::from_millis(250)),
            ScriptedOpponent::new([Move::Rock]),
            FeedbackDispatcher::default(),
        );

        session.submit_move(Move::Paper).await;
        sleep(Duration::from_millis(251)).await;

        assert!(session.selection().await.is_empty());
    }
}
