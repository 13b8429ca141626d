mod end;
mod game;
mod highscores;
mod start;

pub(crate) use end::EndGame;
pub(crate) use game::PowerCurveGame;
pub(crate) use highscores::HighScores;
pub(crate) use start::StartGame;
