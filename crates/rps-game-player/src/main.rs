//! RPS Game Player Service
//!
//! HTTP service with Web UI: one game session per process, driven by the
//! browser through `/api/play` and `/api/reset`.

mod config;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rps_game_core::{
    AudioBackend, FeedbackDispatcher, GameError, GameSession, LogAudio, Move, Phase,
    PlaybackFailure, RoundFeedback, SessionSnapshot,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::PlayerConfig;

/// Application error type
struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

impl From<GameError> for AppError {
    fn from(e: GameError) -> Self {
        match e {
            GameError::InvalidMove(_) => AppError(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}

/// Player state
struct PlayerState {
    session: GameSession,
}

// === Request/Response types ===

#[derive(Deserialize)]
struct PlayRequest {
    #[serde(rename = "move")]
    choice: String,
}

#[derive(Serialize)]
struct StateResponse {
    #[serde(flatten)]
    snapshot: SessionSnapshot,
    phase: Phase,
    /// Moves whose buttons are drawn selected
    highlighted: Vec<Move>,
}

impl StateResponse {
    async fn read(session: &GameSession) -> Self {
        let snapshot = session.snapshot().await;
        let highlighted = Move::ALL
            .into_iter()
            .filter(|m| snapshot.selection.contains(*m))
            .collect();
        Self {
            snapshot,
            phase: session.phase().await,
            highlighted,
        }
    }
}

// === Route handlers ===

async fn health() -> &'static str {
    "ok"
}

async fn get_state(State(state): State<Arc<PlayerState>>) -> Json<StateResponse> {
    Json(StateResponse::read(&state.session).await)
}

async fn play(
    State(state): State<Arc<PlayerState>>,
    Json(req): Json<PlayRequest>,
) -> Result<Json<RoundFeedback>, AppError> {
    let feedback = state.session.submit_input(&req.choice).await.map_err(|e| {
        warn!("Rejected move {:?}: {}", req.choice, e);
        AppError::from(e)
    })?;

    info!("Round {}: {}", feedback.record.index, feedback.result_text);

    Ok(Json(feedback))
}

async fn reset(State(state): State<Arc<PlayerState>>) -> Json<StateResponse> {
    state.session.reset().await;
    info!("Session {} reset", state.session.id());

    Json(StateResponse::read(&state.session).await)
}

fn create_router(state: Arc<PlayerState>, static_dir: &str) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/state", get(get_state))
        .route("/api/play", post(play))
        .route("/api/reset", post(reset))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Log every playback failure until the session is gone
fn spawn_error_reporter(mut errors: mpsc::UnboundedReceiver<PlaybackFailure>) {
    tokio::spawn(async move {
        while let Some(failure) = errors.recv().await {
            warn!("{} sound failed to play: {}", failure.key, failure.error);
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PlayerConfig::from_env();

    let (error_tx, error_rx) = mpsc::unbounded_channel();
    spawn_error_reporter(error_rx);

    let audio: Arc<dyn AudioBackend> = Arc::new(LogAudio);
    let feedback = FeedbackDispatcher::new(config.session.event_capacity)
        .with_audio(audio)
        .with_error_channel(error_tx);
    let session = GameSession::new(config.session.clone(), config.session.opponent(), feedback);
    info!("Session {} ready", session.id());

    let state = Arc::new(PlayerState { session });
    let app = create_router(Arc::clone(&state), &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Player service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match Arc::try_unwrap(state) {
        Ok(state) => state.session.dispose().await,
        Err(_) => warn!("Session still referenced at shutdown"),
    }
    info!("Player service stopped");

    Ok(())
}
