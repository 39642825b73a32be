use dioxus::prelude::*;
use dioxus_router::use_navigator;
use math_core::model::GameType;
use services::GameController;

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;
use crate::views::LogoutButton;
use crate::vm::game_blurb;

#[component]
pub fn GameSelectView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let user = use_context::<CurrentUser>().0;
    let player = user().unwrap_or_default();

    rsx! {
        div { class: "page page--select",
            h1 { "Monster Math" }
            p { class: "subtitle", "Welcome, {player}! Pick a game." }

            ul { class: "game-list",
                for game_type in GameType::ALL {
                    li { key: "{game_type.as_str()}",
                        button {
                            class: "game-card",
                            onclick: {
                                let ctx = ctx.clone();
                                move |_| {
                                    ctx.with_game(GameController::end);
                                    navigator.push(Route::Game {
                                        game_type: game_type.as_str().to_owned(),
                                    });
                                }
                            },
                            "{game_type.title()}"
                            small { "{game_blurb(game_type)}" }
                        }
                    }
                }
            }

            div { class: "nav-buttons",
                button { onclick: move |_| { navigator.push(Route::Stats {}); }, "View Stats" }
                LogoutButton {}
            }
        }
    }
}
