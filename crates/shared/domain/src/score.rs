use crate::game::Difficulty;
use serde::{Deserialize, Serialize};

/// Result of a finished round, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScore {
    pub name: String,
    pub difficulty: Difficulty,
    pub score: f64,
    pub seed: u32,
}

/// A persisted high-score entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub name: String,
    pub difficulty: Difficulty,
    pub score: f64,
    pub seed: u32,
    /// RFC 3339 UTC timestamp of when the round ended.
    pub timestamp: String,
}
