use crate::Route;
use crate::round::{Phase, Round};
use dioxus::prelude::*;

#[component]
pub(crate) fn EndGame() -> Element {
    let round = use_context::<Signal<Round>>();
    let round = round.read();

    let Phase::Finished { score } = round.phase else {
        return rsx! {
            main { class: "screen end",
                p { "No finished round yet." }
                Link { to: Route::StartGame {}, "Start a round" }
            }
        };
    };

    let seed = round.seed.map(|seed| seed.to_string()).unwrap_or_default();

    rsx! {
        main { class: "screen end",
            h1 { "Round over" }
            p { class: "player", "{round.request.name}" }
            p { class: "score", "{score:.1}" }
            dl {
                dt { "Difficulty" }
                dd { "{round.difficulty}" }
                dt { "Seed" }
                dd { "{seed}" }
            }
            nav {
                Link { to: Route::StartGame {}, "Play again" }
                Link { to: Route::HighScores {}, "High scores" }
            }
        }
    }
}
