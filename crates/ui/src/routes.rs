use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, use_navigator};

use crate::context::{AppContext, CurrentUser};
use crate::views::{AuthView, GameSelectView, GameView, StatsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/", AuthView)] Auth {},
        #[layout(SignedIn)]
            #[route("/play", GameSelectView)] GameSelect {},
            #[route("/play/:game_type", GameView)] Game { game_type: String },
            #[route("/stats", StatsView)] Stats {},
}

#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "container",
            Outlet::<Route> {}
        }
    }
}

/// Gate for the player-only screens.
///
/// Without a known player it asks the backend for an existing session and
/// falls back to the login screen when there is none.
#[component]
fn SignedIn() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut user = use_context::<CurrentUser>().0;
    let auth = ctx.auth();

    let session = use_resource(move || {
        let auth = auth.clone();
        async move {
            let known = user.peek().clone();
            match known {
                Some(name) => Some(name),
                None => auth.current_user().await,
            }
        }
    });

    use_effect(move || {
        let checked = session.value().read().clone();
        match checked {
            Some(Some(name)) => {
                if user.peek().as_deref() != Some(name.as_str()) {
                    user.set(Some(name));
                }
            }
            Some(None) => {
                navigator.replace(Route::Auth {});
            }
            None => {}
        }
    });

    if user.read().is_some() {
        rsx! { Outlet::<Route> {} }
    } else {
        rsx! { p { class: "subtitle", "Loading..." } }
    }
}
