//! Client-side state of the current round, driven by server frames.

use powermatch::domain::constants::{ANONYMOUS_PLAYER, ROUND_TICKS};
use powermatch::domain::game::Difficulty;
use powermatch::domain::protocol::{GameRequest, ServerMessage, TickUpdate};

/// What the game socket reported.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketEvent {
    Message(ServerMessage),
    Closed,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    /// No round requested yet.
    #[default]
    Idle,
    Connecting,
    Playing,
    Finished {
        score: f64,
    },
    Failed(String),
}

/// Round as seen by the player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Round {
    pub request: GameRequest,
    pub phase: Phase,
    pub seed: Option<u32>,
    pub difficulty: Difficulty,
    pub target: Vec<f64>,
    pub tolerance: Vec<f64>,
    pub ticks: Vec<TickUpdate>,
    pub total: f64,
}

impl Round {
    /// A round about to connect with `request`.
    #[must_use]
    pub fn begin(request: GameRequest) -> Self {
        let difficulty = request.difficulty;
        Self { request, phase: Phase::Connecting, difficulty, ..Self::default() }
    }

    pub fn on_socket(&mut self, event: SocketEvent) {
        match event {
            SocketEvent::Message(message) => self.apply(message),
            SocketEvent::Failed(reason) => self.fail(reason),
            SocketEvent::Closed => {
                if !self.is_over() {
                    self.fail("Connection closed before the round ended");
                }
            },
        }
    }

    pub fn apply(&mut self, message: ServerMessage) {
        match message {
            ServerMessage::Init { target_curve, tolerance_curve, difficulty, seed, .. } => {
                self.target = target_curve;
                self.tolerance = tolerance_curve;
                self.difficulty = difficulty;
                self.seed = Some(seed);
                self.ticks.clear();
                self.total = 0.0;
                self.phase = Phase::Playing;
            },
            ServerMessage::Tick(update) => {
                self.total = update.total_score;
                self.ticks.push(update);
            },
            ServerMessage::End { score, seed, difficulty } => {
                self.total = score;
                self.seed = Some(seed);
                self.difficulty = difficulty;
                self.phase = Phase::Finished { score };
            },
            ServerMessage::Error { message } => self.fail(message),
        }
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.phase = Phase::Failed(reason.into());
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. } | Phase::Failed(_))
    }

    /// Seconds played so far.
    #[must_use]
    pub fn elapsed(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.duration().saturating_sub(self.elapsed())
    }

    #[must_use]
    pub fn duration(&self) -> usize {
        if self.target.is_empty() { ROUND_TICKS } else { self.target.len() }
    }

    /// Measured power per played second.
    #[must_use]
    pub fn actual(&self) -> Vec<f64> {
        self.ticks.iter().map(|tick| tick.actual).collect()
    }

    #[must_use]
    pub fn last_tick(&self) -> Option<&TickUpdate> {
        self.ticks.last()
    }
}

/// Trimmed player name, or the anonymous name when blank.
#[must_use]
pub fn player_name(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() { ANONYMOUS_PLAYER.to_owned() } else { name.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init(seed: u32) -> ServerMessage {
        ServerMessage::Init {
            target_curve: vec![20.0; ROUND_TICKS],
            tolerance_curve: vec![10.0; ROUND_TICKS],
            difficulty: Difficulty::Hard,
            seed,
            duration: ROUND_TICKS,
            start_time: 1.0,
        }
    }

    fn tick(second: usize, actual: f64, total_score: f64) -> ServerMessage {
        ServerMessage::Tick(TickUpdate {
            second,
            actual,
            target: 20.0,
            tolerance: 10.0,
            tick_score: 0.0,
            total_score,
        })
    }

    #[test]
    fn frames_drive_the_round_to_its_end() {
        let mut round = Round::begin(GameRequest { name: "ada".into(), difficulty: Difficulty::Hard });
        assert_eq!(round.phase, Phase::Connecting);

        round.apply(init(4242));
        assert_eq!(round.phase, Phase::Playing);
        assert_eq!(round.seed, Some(4242));
        assert_eq!(round.remaining(), ROUND_TICKS);

        round.apply(tick(0, 18.0, 12.5));
        round.apply(tick(1, 22.0, 30.0));
        assert_eq!(round.elapsed(), 2);
        assert_eq!(round.actual(), [18.0, 22.0]);
        assert!((round.total - 30.0).abs() < f64::EPSILON);

        round.apply(ServerMessage::End { score: 30.0, seed: 4242, difficulty: Difficulty::Hard });
        assert_eq!(round.phase, Phase::Finished { score: 30.0 });

        round.on_socket(SocketEvent::Closed);
        assert_eq!(round.phase, Phase::Finished { score: 30.0 });
    }

    #[test]
    fn early_close_and_error_frames_fail_the_round() {
        let mut round = Round::begin(GameRequest::default());
        round.apply(init(1000));
        round.on_socket(SocketEvent::Closed);
        assert!(matches!(round.phase, Phase::Failed(_)));

        let mut round = Round::begin(GameRequest::default());
        round.apply(ServerMessage::Error { message: "bad request".into() });
        assert_eq!(round.phase, Phase::Failed("bad request".into()));
    }

    #[test]
    fn blank_names_become_anonymous() {
        assert_eq!(player_name("  "), ANONYMOUS_PLAYER);
        assert_eq!(player_name(" ada "), "ada");
    }
}
