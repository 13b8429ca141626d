//! Client routes, one per entry of the kernel route table.

use crate::views::{EndGame, HighScores, PowerCurveGame, StartGame};
use dioxus::prelude::*;
use powermatch::kernel::routes::View;

/// No catch-all: an undeclared path has no matching route.
#[derive(Debug, Clone, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    StartGame {},
    #[route("/game")]
    PowerCurveGame {},
    #[route("/end")]
    EndGame {},
    #[route("/highscores")]
    HighScores {},
}

impl Route {
    #[must_use]
    pub const fn view(&self) -> View {
        match self {
            Self::StartGame {} => View::StartGame,
            Self::PowerCurveGame {} => View::PowerCurveGame,
            Self::EndGame {} => View::EndGame,
            Self::HighScores {} => View::HighScores,
        }
    }

    #[must_use]
    pub const fn from_view(view: View) -> Self {
        match view {
            View::StartGame => Self::StartGame {},
            View::PowerCurveGame => Self::PowerCurveGame {},
            View::EndGame => Self::EndGame {},
            View::HighScores => Self::HighScores {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powermatch::kernel::routes::ROUTES;

    #[test]
    fn routes_mirror_the_table() {
        for entry in ROUTES {
            let route = Route::from_view(entry.view);
            assert_eq!(route.to_string(), entry.path);
            assert_eq!(route.view(), entry.view);
            assert_eq!(entry.path.parse::<Route>().ok(), Some(route));
        }
    }

    #[test]
    fn undeclared_paths_do_not_parse() {
        assert!("/nope".parse::<Route>().is_err());
        assert!("/game/extra".parse::<Route>().is_err());
    }
}
