use crate::engine::GameEngine;
use crate::error::GameError;
use pm_domain::constants::ROUND_TICKS;
use pm_domain::meter::PowerReading;
use pm_domain::protocol::{GameRequest, ServerMessage};
use pm_domain::score::NewScore;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, instrument, warn};

const MIN_TICK: Duration = Duration::from_millis(1);

/// Outbound half of a player connection.
pub trait MessageSink: Send {
    /// Delivers one frame to the player.
    fn send(&mut self, message: ServerMessage) -> impl Future<Output = Result<(), GameError>> + Send;
}

/// Persistence of finished rounds.
pub trait ScoreStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save(&self, score: NewScore) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Drives rounds for connected players and records their results.
#[derive(Debug, Clone)]
pub struct GameRunner<S> {
    store: S,
    tick: Duration,
}

impl<S: ScoreStore> GameRunner<S> {
    /// `tick` is the interval between scored ticks (one second in play).
    #[must_use]
    pub fn new(store: S, tick: Duration) -> Self {
        Self { store, tick: tick.max(MIN_TICK) }
    }

    #[must_use]
    pub const fn tick(&self) -> Duration {
        self.tick
    }

    /// Plays one round for `request` and persists the final score.
    ///
    /// Sends `init`, then every `tick` frame and the `end` frame, then saves.
    /// A round the player abandons is not saved.
    ///
    /// # Errors
    /// * [`GameError::Channel`] if a frame cannot be delivered.
    /// * [`GameError::Aborted`] if the round stops early.
    /// * [`GameError::Store`] if the score cannot be saved.
    #[instrument(skip_all, fields(player = %request.name, difficulty = %request.difficulty))]
    pub async fn run<M: MessageSink>(
        &self,
        request: GameRequest,
        readings: broadcast::Receiver<Arc<PowerReading>>,
        sink: &mut M,
    ) -> Result<NewScore, GameError> {
        let engine = GameEngine::random(request.name, request.difficulty);
        info!(seed = engine.seed(), "Starting round");

        sink.send(engine.init_message(unix_now())).await?;

        let (tx, mut rx) = mpsc::channel(ROUND_TICKS + 1);
        let forward = async move {
            while let Some(message) = rx.recv().await {
                sink.send(message).await?;
            }
            Ok::<_, GameError>(())
        };

        let (played, forwarded) = tokio::join!(engine.run(readings, self.tick, tx), forward);
        forwarded?;
        let score = played?;

        self.store.save(score.clone()).await.map_err(|e| {
            warn!(error = %e, "Failed to save score");
            GameError::Store { message: e.to_string().into(), context: Some(score.name.clone().into()) }
        })?;

        info!(score = score.score, "Round saved");
        Ok(score)
    }
}

fn unix_now() -> f64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs_f64()).unwrap_or_default()
}
