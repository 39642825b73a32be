use dioxus::prelude::*;
use dioxus_router::use_navigator;
use math_core::model::StatsFilter;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{LogoutButton, ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptRowVm, StatsVm, filter_options, map_stats_report};

#[component]
pub fn StatsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let stats = ctx.stats();
    let paused_game = ctx.with_game(|game| game.game_type());

    let mut filter = use_signal(|| paused_game.map_or(StatsFilter::All, StatsFilter::Game));

    let resource = use_resource(move || {
        let stats = stats.clone();
        let filter = filter();
        async move {
            let report = stats
                .fetch(filter)
                .await
                .map_err(|err| ViewError::Alert(err.user_message()))?;
            Ok::<_, ViewError>(map_stats_report(&report))
        }
    });

    let state = view_state_from_resource(resource);
    let selected = filter().as_query_value();

    rsx! {
        div { class: "page page--stats",
            h2 { "Your Stats" }

            div { class: "form-group",
                label { r#for: "stats-filter", "Show" }
                select {
                    id: "stats-filter",
                    value: "{selected}",
                    onchange: move |evt| match evt.value().parse::<StatsFilter>() {
                        Ok(next) => filter.set(next),
                        Err(err) => log::warn!("ignoring stats filter: {err}"),
                    },
                    for (value, label) in filter_options() {
                        option {
                            key: "{value}",
                            value: "{value}",
                            selected: value == selected,
                            "{label}"
                        }
                    }
                }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "subtitle", "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    StatsReportPanel { data }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "error", "{err.message()}" }
                },
            }

            div { class: "nav-buttons",
                match paused_game {
                    Some(game_type) => rsx! {
                        button {
                            onclick: move |_| {
                                navigator.push(Route::Game {
                                    game_type: game_type.as_str().to_owned(),
                                });
                            },
                            "Back to Game"
                        }
                    },
                    None => rsx! {
                        button {
                            onclick: move |_| {
                                navigator.push(Route::GameSelect {});
                            },
                            "Choose a Game"
                        }
                    },
                }
                LogoutButton {}
            }
        }
    }
}

#[component]
fn StatsReportPanel(data: StatsVm) -> Element {
    let totals = data.totals;
    rsx! {
        div { class: "score-board",
            div { class: "score-item", "Total Attempts: {totals.total_attempts}" }
            div { class: "score-item", "Correct: {totals.correct_attempts}" }
            div { class: "score-item", "Accuracy: {totals.accuracy}" }
        }
        div { class: "score-board",
            div { class: "score-item", "Avg Time: {totals.avg_time}" }
            div { class: "score-item", "Best Time: {totals.best_time}" }
        }

        h3 { "Recent Attempts" }
        if data.rows.is_empty() {
            p { class: "subtitle", "No attempts yet. Go solve some puzzles!" }
        } else {
            table { class: "stats-table",
                thead {
                    tr {
                        th { "Game" }
                        th { "Question" }
                        th { "Time" }
                        th { "Result" }
                        th { "Timestamp" }
                    }
                }
                tbody {
                    for row in data.rows {
                        AttemptRow { row }
                    }
                }
            }
        }
    }
}

#[component]
fn AttemptRow(row: AttemptRowVm) -> Element {
    rsx! {
        tr { class: "{row.row_class()}",
            td { "{row.game}" }
            td { "{row.question}" }
            td { "{row.time}" }
            td { "{row.result_icon()}" }
            td { "{row.timestamp}" }
        }
    }
}
