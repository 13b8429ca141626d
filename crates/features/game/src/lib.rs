//! # Game
//!
//! A round lasts 30 one-second ticks. Each tick the latest smart-meter reading
//! is compared with the target curve and scored against the difficulty's
//! tolerance band.
//!
//! * [`curve`]: seed-deterministic target curves.
//! * [`score`]: per-tick scoring and the tolerance band.
//! * [`engine`]: executes one round over a stream of readings.
//! * [`runner`]: drives a round for one client and persists the result.

pub mod curve;
pub mod engine;
mod error;
pub mod runner;
pub mod score;

pub use crate::engine::GameEngine;
pub use crate::error::{GameError, GameErrorExt};
pub use crate::runner::{GameRunner, MessageSink, ScoreStore};
