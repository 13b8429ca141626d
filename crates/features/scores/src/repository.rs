use crate::error::{ScoreError, ScoreErrorExt};
use chrono::{DateTime, SecondsFormat, Utc};
use pm_database::Database;
use pm_domain::constants::{DEFAULT_HIGHSCORE_LIMIT, MAX_HIGHSCORE_LIMIT};
use pm_domain::game::Difficulty;
use pm_domain::score::{NewScore, Score};
use pm_game::ScoreStore;
use serde::Deserialize;
use surrealdb::types::SurrealValue;
use tracing::{debug, instrument};

const INSERT_SCORE: &str =
    "CREATE score SET name = $name, difficulty = $difficulty, score = $score, seed = $seed";

const TOP_SCORES: &str = "
    SELECT name, difficulty, score, seed, <string> timestamp AS timestamp
    FROM score
    WHERE $difficulty = NONE OR difficulty = $difficulty
    ORDER BY score DESC
    LIMIT $limit";

/// Query string of the high-score endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreQuery {
    pub difficulty: Option<String>,
    pub limit: Option<usize>,
}

impl ScoreQuery {
    /// Parsed difficulty filter; empty means no filter.
    ///
    /// # Errors
    /// Returns [`ScoreError::Validation`] for an unknown difficulty name.
    pub fn difficulty(&self) -> Result<Option<Difficulty>, ScoreError> {
        match self.difficulty.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(name) => Difficulty::parse(name).map(Some).ok_or_else(|| ScoreError::Validation {
                message: format!("Unknown difficulty '{name}'").into(),
                context: None,
            }),
        }
    }

    /// Requested limit clamped to `1..=100`, defaulting to 10.
    #[must_use]
    pub fn limit(&self) -> usize {
        clamp_limit(self.limit.unwrap_or(DEFAULT_HIGHSCORE_LIMIT))
    }
}

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_HIGHSCORE_LIMIT)
}

#[derive(Debug, SurrealValue)]
struct ScoreRow {
    name: String,
    difficulty: String,
    score: f64,
    seed: i64,
    timestamp: String,
}

impl TryFrom<ScoreRow> for Score {
    type Error = ScoreError;

    fn try_from(row: ScoreRow) -> Result<Self, Self::Error> {
        let difficulty = Difficulty::parse(&row.difficulty).ok_or_else(|| ScoreError::Internal {
            message: format!("Stored difficulty '{}' is unknown", row.difficulty).into(),
            context: None,
        })?;
        let seed = u32::try_from(row.seed).map_err(|e| ScoreError::Internal {
            message: e.to_string().into(),
            context: Some("Stored seed out of range".into()),
        })?;
        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp).map_or(row.timestamp, |t| {
            t.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true)
        });

        Ok(Self { name: row.name, difficulty, score: row.score, seed, timestamp })
    }
}

/// High-score storage.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db: Database,
}

impl ScoreRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores a finished round; the database stamps the time.
    ///
    /// # Errors
    /// Returns [`ScoreError::Surreal`] if the record is rejected.
    #[instrument(skip(self, score), fields(player = %score.name, score = score.score))]
    pub async fn insert(&self, score: &NewScore) -> Result<(), ScoreError> {
        self.db
            .query(INSERT_SCORE)
            .bind(("name", score.name.clone()))
            .bind(("difficulty", score.difficulty.as_str()))
            .bind(("score", score.score))
            .bind(("seed", i64::from(score.seed)))
            .await
            .context("Saving score")?
            .check()
            .map_err(surrealdb::Error::from)?;

        debug!("Score stored");
        Ok(())
    }

    /// Best scores, highest first, optionally for one difficulty.
    ///
    /// `limit` is clamped to `1..=100`.
    ///
    /// # Errors
    /// Returns [`ScoreError::Surreal`] if the query fails, or
    /// [`ScoreError::Internal`] if a stored row is malformed.
    pub async fn top(
        &self,
        difficulty: Option<Difficulty>,
        limit: usize,
    ) -> Result<Vec<Score>, ScoreError> {
        let rows = self
            .db
            .query(TOP_SCORES)
            .bind(("difficulty", difficulty.map(Difficulty::as_str)))
            .bind(("limit", i64::try_from(clamp_limit(limit)).unwrap_or(1)))
            .await
            .context("Loading high scores")?
            .take::<Vec<ScoreRow>>(0)
            .context("Parsing high scores")?;

        rows.into_iter().map(Score::try_from).collect()
    }

    /// [`ScoreRepository::top`] driven by a [`ScoreQuery`].
    ///
    /// # Errors
    /// As [`ScoreRepository::top`], plus [`ScoreError::Validation`] for a bad filter.
    pub async fn search(&self, query: &ScoreQuery) -> Result<Vec<Score>, ScoreError> {
        self.top(query.difficulty()?, query.limit()).await
    }
}

impl ScoreStore for ScoreRepository {
    type Error = ScoreError;

    async fn save(&self, score: NewScore) -> Result<(), ScoreError> {
        self.insert(&score).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(ScoreQuery::default().limit(), 10);
        assert_eq!(ScoreQuery { limit: Some(0), ..ScoreQuery::default() }.limit(), 1);
        assert_eq!(ScoreQuery { limit: Some(5000), ..ScoreQuery::default() }.limit(), 100);
    }

    #[test]
    fn difficulty_filter_is_strict() {
        let query = |d: &str| ScoreQuery { difficulty: Some(d.to_owned()), limit: None };
        assert_eq!(query("Hard").difficulty().unwrap(), Some(Difficulty::Hard));
        assert_eq!(query("").difficulty().unwrap(), None);
        assert!(matches!(query("hard").difficulty(), Err(ScoreError::Validation { .. })));
    }

    #[test]
    fn rows_convert_with_normalised_timestamp() {
        let row = ScoreRow {
            name: "ada".to_owned(),
            difficulty: "Easy".to_owned(),
            score: 812.5,
            seed: 4242,
            timestamp: "2025-03-01T10:20:30.123456Z".to_owned(),
        };
        let score = Score::try_from(row).unwrap();
        assert_eq!(score.difficulty, Difficulty::Easy);
        assert_eq!(score.seed, 4242);
        assert_eq!(score.timestamp, "2025-03-01T10:20:30Z");
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let row = ScoreRow {
            name: "ada".to_owned(),
            difficulty: "Easy".to_owned(),
            score: 1.0,
            seed: -1,
            timestamp: String::new(),
        };
        assert!(matches!(Score::try_from(row), Err(ScoreError::Internal { .. })));
    }
}
