use crate::error::WebError;
use crate::round::SocketEvent;
use powermatch::domain::game::Difficulty;
use powermatch::domain::protocol::GameRequest;
use powermatch::domain::score::Score;

/// Placeholder connection; never constructed off the browser.
#[derive(Debug)]
pub(crate) struct RoundSocket;

fn unsupported(context: &'static str) -> WebError {
    WebError::Unsupported { message: "No browser available".into(), context: Some(context.into()) }
}

pub(crate) fn open_round(
    _request: &GameRequest,
    _on_event: impl FnMut(SocketEvent) + 'static,
) -> Result<RoundSocket, WebError> {
    Err(unsupported("Opening game socket"))
}

pub(crate) async fn highscores(_difficulty: Option<Difficulty>) -> Result<Vec<Score>, WebError> {
    Err(unsupported("Loading high scores"))
}
