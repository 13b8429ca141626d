//! Literal path → view table of the client application.
//!
//! Lookup is an exact string match: no parameters, no prefix matching, no
//! trailing-slash normalisation and no catch-all. Anything not listed resolves
//! to `None`.

/// Top-level screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    StartGame,
    PowerCurveGame,
    EndGame,
    HighScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub view: View,
}

/// Declared routes, in declaration order.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry { path: "/", view: View::StartGame },
    RouteEntry { path: "/game", view: View::PowerCurveGame },
    RouteEntry { path: "/end", view: View::EndGame },
    RouteEntry { path: "/highscores", view: View::HighScores },
];

impl View {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::StartGame => "/",
            Self::PowerCurveGame => "/game",
            Self::EndGame => "/end",
            Self::HighScores => "/highscores",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::StartGame => "PowerMatch",
            Self::PowerCurveGame => "PowerMatch | Round",
            Self::EndGame => "PowerMatch | Result",
            Self::HighScores => "PowerMatch | High Scores",
        }
    }
}

/// Resolves `path` against [`ROUTES`].
#[must_use]
pub fn resolve(path: &str) -> Option<View> {
    ROUTES.iter().find(|entry| entry.path == path).map(|entry| entry.view)
}

/// Iterates the declared paths.
pub fn paths() -> impl Iterator<Item = &'static str> {
    ROUTES.iter().map(|entry| entry.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_round_trips_through_its_view() {
        for entry in ROUTES {
            assert_eq!(resolve(entry.path), Some(entry.view));
            assert_eq!(entry.view.path(), entry.path);
        }
    }

    #[test]
    fn paths_are_unique() {
        let mut seen: Vec<_> = paths().collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ROUTES.len());
    }

    #[test]
    fn near_misses_do_not_resolve() {
        for path in ["", "/game/", "/Game", "/end?x=1", "/highscores/all", "//", "/unknown"] {
            assert_eq!(resolve(path), None, "{path:?} should not resolve");
        }
    }
}
