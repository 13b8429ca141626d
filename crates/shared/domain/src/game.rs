use serde::{Deserialize, Serialize};
use std::fmt;

/// Round difficulty.
///
/// Deserialization is lenient: anything other than `"Easy"`, `"Medium"` or
/// `"Hard"` becomes [`Difficulty::Medium`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Maximum distance in watts that still scores.
    #[must_use]
    pub const fn tolerance(self) -> f64 {
        match self {
            Self::Easy => 15.0,
            Self::Medium => 10.0,
            Self::Hard => 6.0,
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.25,
            Self::Hard => 1.5,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Strict parse; `None` for unknown names.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rounds to one decimal place, the precision of every curve value and score.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_medium() {
        let parsed: Difficulty = serde_json::from_str("\"Nightmare\"").unwrap();
        assert_eq!(parsed, Difficulty::Medium);
        assert_eq!(Difficulty::parse("Nightmare"), None);
    }

    #[test]
    fn serializes_as_plain_name() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"Hard\"");
    }

    #[test]
    fn round1_keeps_one_decimal() {
        assert!((round1(12.345) - 12.3).abs() < f64::EPSILON);
        assert!((round1(99.96) - 100.0).abs() < f64::EPSILON);
    }
}
