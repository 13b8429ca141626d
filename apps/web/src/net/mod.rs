//! Server endpoints used by the client.
//!
//! The browser implementation talks to the page origin; other targets have no
//! browser and report [`WebError::Unsupported`](crate::WebError::Unsupported).

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(not(target_arch = "wasm32"))]
mod offline;

#[cfg(target_arch = "wasm32")]
pub(crate) use browser::{RoundSocket, highscores, open_round};
#[cfg(not(target_arch = "wasm32"))]
pub(crate) use offline::{RoundSocket, highscores, open_round};

use powermatch::domain::constants::{GAME_SOCKET_PATH, HIGHSCORES_API_PATH};
use powermatch::domain::game::Difficulty;

/// Game socket URL on the origin `host`, secure when the page is served over `https:`.
#[must_use]
pub fn socket_url(protocol: &str, host: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!("{scheme}://{host}{GAME_SOCKET_PATH}")
}

#[must_use]
pub fn highscores_url(difficulty: Option<Difficulty>) -> String {
    match difficulty {
        Some(difficulty) => format!("{HIGHSCORES_API_PATH}?difficulty={difficulty}"),
        None => HIGHSCORES_API_PATH.to_owned(),
    }
}
