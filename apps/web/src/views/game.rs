use crate::Route;
use crate::chart::Canvas;
use crate::net::{self, RoundSocket};
use crate::round::{Phase, Round};
use dioxus::prelude::*;

#[component]
pub(crate) fn PowerCurveGame() -> Element {
    let mut round = use_context::<Signal<Round>>();
    let navigator = use_navigator();
    let mut socket = use_signal(|| None::<RoundSocket>);

    use_effect(move || {
        let request = round.peek().request.clone();
        round.set(Round::begin(request.clone()));
        match net::open_round(&request, move |event| round.write().on_socket(event)) {
            Ok(connection) => socket.set(Some(connection)),
            Err(e) => round.write().fail(e.to_string()),
        }
    });

    use_effect(move || {
        if matches!(round.read().phase, Phase::Finished { .. }) {
            socket.set(None);
            navigator.replace(Route::EndGame {});
        }
    });

    let round = round.read();
    let canvas = Canvas::DEFAULT;
    let band = canvas.band(&round.target, &round.tolerance);
    let target = canvas.polyline(&round.target);
    let actual = canvas.polyline(&round.actual());
    let current = round.last_tick().map_or(0.0, |tick| tick.actual);
    let status = match &round.phase {
        Phase::Idle | Phase::Connecting => "Connecting…".to_owned(),
        Phase::Playing => format!("{} s left", round.remaining()),
        Phase::Finished { .. } => "Finished".to_owned(),
        Phase::Failed(reason) => reason.clone(),
    };

    rsx! {
        main { class: "screen game",
            header {
                span { class: "player", "{round.request.name}" }
                span { class: "difficulty", "{round.difficulty}" }
                span { class: "status", "{status}" }
            }
            svg { class: "chart", view_box: canvas.view_box(),
                polygon { class: "band", points: "{band}" }
                polyline { class: "target", points: "{target}" }
                polyline { class: "actual", points: "{actual}" }
            }
            section { class: "readout",
                div { "Now: {current:.1} W" }
                div { "Score: {round.total:.1}" }
            }
            if let Phase::Failed(_) = round.phase {
                nav {
                    Link { to: Route::StartGame {}, "Back" }
                }
            }
        }
    }
}
