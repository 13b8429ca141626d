use pm_domain::constants::ROUND_TICKS;
use pm_domain::game::Difficulty;
use pm_domain::meter::PowerReading;
use pm_domain::protocol::{ServerMessage, TickUpdate};
use pm_event_bus::EventBus;
use pm_game::{GameEngine, GameError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

const TICK: Duration = Duration::from_secs(1);

async fn drain(mut rx: mpsc::Receiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut frames = Vec::new();
    while let Some(frame) = rx.recv().await {
        frames.push(frame);
    }
    frames
}

fn ticks(frames: &[ServerMessage]) -> Vec<TickUpdate> {
    frames
        .iter()
        .filter_map(|frame| match frame {
            ServerMessage::Tick(update) => Some(*update),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn emits_thirty_ticks_then_end_on_a_fixed_interval() {
    let bus = EventBus::new();
    let readings = bus.subscribe::<PowerReading>().unwrap();
    let engine = GameEngine::new("ada", Difficulty::Medium, 4242);
    let first_target = engine.preview().0[0];

    bus.publish(PowerReading { watts: first_target }).unwrap();

    let (tx, rx) = mpsc::channel(64);
    let started = Instant::now();
    let score = engine.run(readings, TICK, tx).await.unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= TICK * 30 && elapsed < TICK * 31, "{elapsed:?}");

    let frames = drain(rx).await;
    assert_eq!(frames.len(), ROUND_TICKS + 1);

    let updates = ticks(&frames);
    assert_eq!(updates.len(), ROUND_TICKS);
    assert!((updates[0].tick_score - 125.0).abs() < 1e-9);
    assert!(updates.iter().enumerate().all(|(i, u)| u.second == i));
    assert!(updates.iter().all(|u| (u.actual - first_target).abs() < f64::EPSILON));
    assert!(updates.windows(2).all(|w| w[1].total_score >= w[0].total_score));

    let Some(ServerMessage::End { score: final_score, seed, difficulty }) = frames.last() else {
        panic!("last frame must be end: {frames:?}");
    };
    assert!((final_score - score.score).abs() < f64::EPSILON);
    assert_eq!(*seed, 4242);
    assert_eq!(*difficulty, Difficulty::Medium);
    assert_eq!(score.name, "ada");
}

#[tokio::test(start_paused = true)]
async fn latest_reading_in_interval_wins_and_gaps_reuse_last_value() {
    let bus = EventBus::new();
    let readings = bus.subscribe::<PowerReading>().unwrap();
    let engine = GameEngine::new("ada", Difficulty::Easy, 1000);

    bus.publish(PowerReading { watts: 10.0 }).unwrap();
    bus.publish(PowerReading { watts: 20.0 }).unwrap();

    let publisher = bus.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(2500)).await;
        publisher.publish(PowerReading { watts: 75.0 }).unwrap();
    });

    let (tx, rx) = mpsc::channel(64);
    engine.run(readings, TICK, tx).await.unwrap();
    let updates = ticks(&drain(rx).await);

    assert!((updates[0].actual - 20.0).abs() < f64::EPSILON);
    assert!((updates[1].actual - 20.0).abs() < f64::EPSILON);
    assert!((updates[2].actual - 75.0).abs() < f64::EPSILON);
    assert!((updates[29].actual - 75.0).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn no_readings_score_against_zero_watts() {
    let bus = EventBus::new();
    let readings = bus.subscribe::<PowerReading>().unwrap();
    bus.shutdown();

    let engine = GameEngine::new("ada", Difficulty::Hard, 5555);
    let (tx, rx) = mpsc::channel(64);
    let score = engine.run(readings, TICK, tx).await.unwrap();

    let updates = ticks(&drain(rx).await);
    assert!(updates.iter().all(|u| u.actual.abs() < f64::EPSILON));
    assert!(updates.iter().all(|u| u.tick_score.abs() < f64::EPSILON));
    assert!(score.score.abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn dropped_receiver_aborts_the_round() {
    let bus = EventBus::new();
    let readings = bus.subscribe::<PowerReading>().unwrap();
    let engine = GameEngine::new("ada", Difficulty::Medium, 4242);

    let (tx, mut rx) = mpsc::channel(1);
    let round = tokio::spawn(async move { engine.run(readings, TICK, tx).await });

    for _ in 0..3 {
        assert!(matches!(rx.recv().await, Some(ServerMessage::Tick(_))));
    }
    drop(rx);

    let err = round.await.unwrap().unwrap_err();
    assert!(matches!(err, GameError::Aborted { .. }));
}
