//! JSON frames exchanged over the game WebSocket.

use crate::constants::ANONYMOUS_PLAYER;
use crate::game::Difficulty;
use serde::{Deserialize, Serialize};

/// First frame a client sends to start a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRequest {
    #[serde(default = "anonymous")]
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn anonymous() -> String {
    ANONYMOUS_PLAYER.to_owned()
}

impl Default for GameRequest {
    fn default() -> Self {
        Self { name: anonymous(), difficulty: Difficulty::default() }
    }
}

/// Frames the server pushes during a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    Init {
        #[serde(rename = "targetCurve")]
        target_curve: Vec<f64>,
        #[serde(rename = "toleranceCurve")]
        tolerance_curve: Vec<f64>,
        difficulty: Difficulty,
        seed: u32,
        duration: usize,
        /// Unix seconds.
        start_time: f64,
    },
    Tick(TickUpdate),
    End {
        score: f64,
        seed: u32,
        difficulty: Difficulty,
    },
    Error {
        message: String,
    },
}

/// One scored second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickUpdate {
    pub second: usize,
    pub actual: f64,
    pub target: f64,
    pub tolerance: f64,
    #[serde(rename = "tickScore")]
    pub tick_score: f64,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_request_uses_defaults() {
        let req: GameRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, GameRequest::default());
        assert_eq!(req.name, "Unknown");
        assert_eq!(req.difficulty, Difficulty::Medium);
    }

    #[test]
    fn tick_is_flattened_under_type_tag() {
        let msg = ServerMessage::Tick(TickUpdate {
            second: 3,
            actual: 50.0,
            target: 52.5,
            tolerance: 10.0,
            tick_score: 93.8,
            total_score: 280.1,
        });

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "tick",
                "second": 3,
                "actual": 50.0,
                "target": 52.5,
                "tolerance": 10.0,
                "tickScore": 93.8,
                "totalScore": 280.1
            })
        );
    }

    #[test]
    fn init_uses_camel_case_curve_keys() {
        let msg = ServerMessage::Init {
            target_curve: vec![20.0],
            tolerance_curve: vec![10.0],
            difficulty: Difficulty::Easy,
            seed: 4242,
            duration: 1,
            start_time: 0.0,
        };

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "init");
        assert_eq!(value["targetCurve"], json!([20.0]));
        assert_eq!(value["toleranceCurve"], json!([10.0]));
        assert_eq!(value["difficulty"], "Easy");
    }
}
