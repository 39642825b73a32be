use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::GameController;

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;

/// Ends any running game, drops the backend session and returns to login.
#[component]
pub fn LogoutButton() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut user = use_context::<CurrentUser>().0;

    rsx! {
        button {
            class: "logout-btn",
            onclick: move |_| {
                let ctx = ctx.clone();
                spawn(async move {
                    ctx.with_game(GameController::end);
                    ctx.auth().logout().await;
                    user.set(None);
                    navigator.replace(Route::Auth {});
                });
            },
            "Logout"
        }
    }
}
