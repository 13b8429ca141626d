use crate::Route;
use crate::net;
use dioxus::prelude::*;
use powermatch::domain::game::Difficulty;

#[component]
pub(crate) fn HighScores() -> Element {
    let mut filter = use_signal(|| None::<Difficulty>);
    let scores = use_resource(move || async move { net::highscores(filter()).await });

    let table = match &*scores.read() {
        None => rsx! { p { "Loading…" } },
        Some(Err(e)) => rsx! { p { class: "error", "{e}" } },
        Some(Ok(list)) if list.is_empty() => rsx! { p { "No scores yet." } },
        Some(Ok(list)) => rsx! {
            table {
                thead {
                    tr {
                        th { "#" }
                        th { "Name" }
                        th { "Difficulty" }
                        th { "Score" }
                        th { "Seed" }
                    }
                }
                tbody {
                    for (rank, entry) in list.iter().enumerate() {
                        tr { key: "{rank}",
                            td { "{rank + 1}" }
                            td { "{entry.name}" }
                            td { "{entry.difficulty}" }
                            td { "{entry.score:.1}" }
                            td { "{entry.seed}" }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        main { class: "screen highscores",
            h1 { "High scores" }
            select {
                onchange: move |event| filter.set(Difficulty::parse(&event.value())),
                option { value: "", "All" }
                for level in Difficulty::ALL {
                    option { value: "{level}", "{level}" }
                }
            }
            {table}
            nav {
                Link { to: Route::StartGame {}, "Play" }
            }
        }
    }
}
