use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pm_database::Database;
use pm_scores::{ScoreError, ScoreQuery, ScoreRepository};
use powermatch::domain::score::Score;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps score failures onto HTTP statuses.
#[derive(Debug)]
pub(crate) struct ScoreFailure(ScoreError);

impl IntoResponse for ScoreFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ScoreError::Validation { .. } => StatusCode::BAD_REQUEST,
            other => {
                error!(error = %other, "High-score lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            },
        };
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

/// `GET /api/highscores?difficulty=&limit=`
pub(crate) async fn highscores_handler(
    State(database): State<Database>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<Vec<Score>>, ScoreFailure> {
    ScoreRepository::new(database).search(&query).await.map(Json).map_err(ScoreFailure)
}
