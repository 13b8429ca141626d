use crate::curve;
use crate::error::GameError;
use crate::score::{tick_score, tolerance_curve};
use pm_domain::constants::ROUND_TICKS;
use pm_domain::game::{Difficulty, round1};
use pm_domain::meter::PowerReading;
use pm_domain::protocol::{ServerMessage, TickUpdate};
use pm_domain::score::NewScore;
use pm_event_bus::EventReceiverExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, instrument};

/// One round for one player.
#[derive(Debug, Clone)]
pub struct GameEngine {
    name: String,
    difficulty: Difficulty,
    seed: u32,
    target: Vec<f64>,
    tolerance: Vec<f64>,
}

impl GameEngine {
    #[must_use]
    pub fn new(name: impl Into<String>, difficulty: Difficulty, seed: u32) -> Self {
        Self {
            name: name.into(),
            difficulty,
            seed,
            target: curve::generate(seed),
            tolerance: tolerance_curve(difficulty),
        }
    }

    /// New round with a freshly drawn seed.
    #[must_use]
    pub fn random(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self::new(name, difficulty, curve::random_seed())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Target and tolerance curves shown before the round starts.
    #[must_use]
    pub fn preview(&self) -> (&[f64], &[f64]) {
        (&self.target, &self.tolerance)
    }

    /// The `init` frame announcing this round.
    #[must_use]
    pub fn init_message(&self, start_time: f64) -> ServerMessage {
        ServerMessage::Init {
            target_curve: self.target.clone(),
            tolerance_curve: self.tolerance.clone(),
            difficulty: self.difficulty,
            seed: self.seed,
            duration: self.target.len(),
            start_time,
        }
    }

    /// Plays the round.
    ///
    /// Ticks fire on a fixed `tick` interval. Each tick scores the latest
    /// reading received during that interval, or the last known value
    /// (initially `0.0`) if none arrived. Every tick is sent as a `tick` frame,
    /// followed by one `end` frame.
    ///
    /// # Errors
    /// Returns [`GameError::Aborted`] if `events` is closed before the round ends.
    #[instrument(skip_all, fields(player = %self.name, seed = self.seed, difficulty = %self.difficulty))]
    pub async fn run(
        &self,
        mut readings: broadcast::Receiver<Arc<PowerReading>>,
        tick: Duration,
        events: mpsc::Sender<ServerMessage>,
    ) -> Result<NewScore, GameError> {
        let mut interval = interval_at(Instant::now() + tick, tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut readings_open = true;
        let mut last_known = 0.0;
        let mut total = 0.0;

        for second in 0..ROUND_TICKS {
            let mut latest = None;
            loop {
                tokio::select! {
                    biased;
                    reading = EventReceiverExt::recv(&mut readings), if readings_open => match reading {
                        Some(reading) => latest = Some(reading.watts),
                        None => {
                            debug!("Reading stream closed; holding last known value");
                            readings_open = false;
                        },
                    },
                    _ = interval.tick() => break,
                }
            }

            let actual = latest.unwrap_or(last_known);
            last_known = actual;

            let target = self.target[second];
            let tolerance = self.tolerance[second];
            let points = tick_score(actual, target, tolerance, self.difficulty);
            total += points;

            let update = TickUpdate {
                second,
                actual,
                target,
                tolerance,
                tick_score: points,
                total_score: round1(total),
            };
            send(&events, ServerMessage::Tick(update)).await?;
        }

        let score = round1(total);
        send(&events, ServerMessage::End { score, seed: self.seed, difficulty: self.difficulty })
            .await?;
        debug!(score, "Round finished");

        Ok(NewScore { name: self.name.clone(), difficulty: self.difficulty, score, seed: self.seed })
    }
}

async fn send(events: &mpsc::Sender<ServerMessage>, message: ServerMessage) -> Result<(), GameError> {
    events.send(message).await.map_err(|_| GameError::Aborted {
        message: "Event receiver dropped".into(),
        context: None,
    })
}
