use pm_domain::constants::ROUND_TICKS;
use pm_domain::game::Difficulty;
use pm_domain::meter::PowerReading;
use pm_domain::protocol::{GameRequest, ServerMessage};
use pm_domain::score::NewScore;
use pm_event_bus::EventBus;
use pm_game::{GameError, GameRunner, MessageSink, ScoreStore};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Frames {
    sent: Vec<ServerMessage>,
    fail_after: Option<usize>,
}

impl MessageSink for Frames {
    async fn send(&mut self, message: ServerMessage) -> Result<(), GameError> {
        if self.fail_after.is_some_and(|limit| self.sent.len() >= limit) {
            return Err(GameError::Channel { message: "socket closed".into(), context: None });
        }
        self.sent.push(message);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemoryStore {
    saved: Arc<Mutex<Vec<NewScore>>>,
    broken: bool,
}

impl ScoreStore for MemoryStore {
    type Error = io::Error;

    async fn save(&self, score: NewScore) -> Result<(), io::Error> {
        if self.broken {
            return Err(io::Error::other("disk full"));
        }
        self.saved.lock().unwrap().push(score);
        Ok(())
    }
}

fn request() -> GameRequest {
    GameRequest { name: "grace".to_owned(), difficulty: Difficulty::Hard }
}

#[tokio::test(start_paused = true)]
async fn round_is_announced_streamed_and_saved() {
    let bus = EventBus::new();
    let store = MemoryStore::default();
    let runner = GameRunner::new(store.clone(), Duration::from_secs(1));
    let mut frames = Frames::default();

    let readings = bus.subscribe::<PowerReading>().unwrap();
    bus.publish(PowerReading { watts: 60.0 }).unwrap();

    let score = runner.run(request(), readings, &mut frames).await.unwrap();

    assert_eq!(frames.sent.len(), ROUND_TICKS + 2);
    let ServerMessage::Init { seed, difficulty, duration, .. } = &frames.sent[0] else {
        panic!("first frame must be init");
    };
    assert_eq!(*seed, score.seed);
    assert_eq!(*difficulty, Difficulty::Hard);
    assert_eq!(*duration, ROUND_TICKS);
    assert!(frames.sent[1..=ROUND_TICKS].iter().all(|f| matches!(f, ServerMessage::Tick(_))));
    assert!(matches!(frames.sent.last(), Some(ServerMessage::End { .. })));

    let saved = store.saved.lock().unwrap().clone();
    assert_eq!(saved, vec![score]);
    assert_eq!(saved[0].name, "grace");
}

#[tokio::test(start_paused = true)]
async fn abandoned_round_is_not_saved() {
    let bus = EventBus::new();
    let store = MemoryStore::default();
    let runner = GameRunner::new(store.clone(), Duration::from_secs(1));
    let mut frames = Frames { fail_after: Some(5), ..Frames::default() };

    let readings = bus.subscribe::<PowerReading>().unwrap();
    let err = runner.run(request(), readings, &mut frames).await.unwrap_err();

    assert!(matches!(err, GameError::Channel { .. }));
    assert_eq!(frames.sent.len(), 5);
    assert!(store.saved.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn store_failure_is_reported_after_end_frame() {
    let bus = EventBus::new();
    let store = MemoryStore { broken: true, ..MemoryStore::default() };
    let runner = GameRunner::new(store, Duration::from_millis(10));
    let mut frames = Frames::default();

    let readings = bus.subscribe::<PowerReading>().unwrap();
    let err = runner.run(request(), readings, &mut frames).await.unwrap_err();

    assert!(matches!(err, GameError::Store { .. }));
    assert!(matches!(frames.sent.last(), Some(ServerMessage::End { .. })));
}

#[test]
fn zero_tick_is_clamped() {
    let runner = GameRunner::new(MemoryStore::default(), Duration::ZERO);
    assert!(runner.tick() > Duration::ZERO);
}
