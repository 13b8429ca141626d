//! # Scores
//!
//! Persists finished rounds and serves the high-score table.

mod error;
mod repository;

pub use crate::error::{ScoreError, ScoreErrorExt};
pub use crate::repository::{ScoreQuery, ScoreRepository};
