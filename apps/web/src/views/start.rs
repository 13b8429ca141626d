use crate::Route;
use crate::round::{Round, player_name};
use dioxus::prelude::*;
use powermatch::domain::constants::ANONYMOUS_PLAYER;
use powermatch::domain::game::Difficulty;
use powermatch::domain::protocol::GameRequest;

#[component]
pub(crate) fn StartGame() -> Element {
    let mut round = use_context::<Signal<Round>>();
    let navigator = use_navigator();
    let mut name = use_signal(String::new);
    let mut difficulty = use_signal(Difficulty::default);

    let start = move |event: FormEvent| {
        event.prevent_default();
        let request = GameRequest { name: player_name(&name.read()), difficulty: difficulty() };
        round.set(Round::begin(request));
        navigator.push(Route::PowerCurveGame {});
    };

    rsx! {
        main { class: "screen start",
            h1 { "PowerMatch" }
            p { class: "lead",
                "Follow the target curve with your household power draw for 30 seconds."
            }
            form { onsubmit: start,
                label { r#for: "player", "Name" }
                input {
                    id: "player",
                    value: "{name}",
                    placeholder: ANONYMOUS_PLAYER,
                    oninput: move |event| name.set(event.value()),
                }
                label { r#for: "difficulty", "Difficulty" }
                select {
                    id: "difficulty",
                    value: "{difficulty}",
                    onchange: move |event| difficulty.set(Difficulty::from(event.value())),
                    for level in Difficulty::ALL {
                        option { value: "{level}", selected: level == difficulty(), "{level}" }
                    }
                }
                button { r#type: "submit", "Start" }
            }
            nav {
                Link { to: Route::HighScores {}, "High scores" }
            }
        }
    }
}
