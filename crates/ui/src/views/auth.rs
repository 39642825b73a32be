#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::AuthAction;

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;

/// Pause on the success message before switching to game selection.
const SIGNED_IN_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq)]
struct AuthNotice {
    text: String,
    success: bool,
}

impl AuthNotice {
    fn class(&self) -> &'static str {
        if self.success { "success" } else { "error" }
    }
}

#[component]
pub fn AuthView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut user = use_context::<CurrentUser>().0;

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut notice = use_signal(|| None::<AuthNotice>);
    let mut busy = use_signal(|| false);

    // A live backend session skips the form.
    let auth_for_check = ctx.auth();
    let existing = use_resource(move || {
        let auth = auth_for_check.clone();
        async move { auth.current_user().await }
    });
    use_effect(move || {
        if let Some(Some(name)) = existing.value().read().clone() {
            user.set(Some(name));
            navigator.replace(Route::GameSelect {});
        }
    });

    let auth = ctx.auth();
    let submit = use_callback(move |action: AuthAction| {
        if *busy.peek() {
            return;
        }
        busy.set(true);
        let auth = auth.clone();
        let name = username.peek().clone();
        let secret = password.peek().clone();
        spawn(async move {
            let result = match action {
                AuthAction::Login => auth.login(&name, &secret).await,
                AuthAction::Register => auth.register(&name, &secret).await,
            };
            match result {
                Ok(signed_in) => {
                    let text = match action {
                        AuthAction::Login => "Login successful!",
                        AuthAction::Register => "Registration successful!",
                    };
                    notice.set(Some(AuthNotice {
                        text: text.to_owned(),
                        success: true,
                    }));
                    tokio::time::sleep(SIGNED_IN_DELAY).await;
                    password.set(String::new());
                    user.set(Some(signed_in));
                    navigator.push(Route::GameSelect {});
                }
                Err(err) => {
                    notice.set(Some(AuthNotice {
                        text: err.user_message(),
                        success: false,
                    }));
                }
            }
            busy.set(false);
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<AuthTestHandles>() {
                handles.register(submit, username, password);
            }
        }
    }

    rsx! {
        div { class: "page page--auth",
            div { class: "monster-header", "👾 👽 🛸" }
            h1 { "Monster Math" }
            p { class: "subtitle", "Login or Register to Play!" }

            div { class: "form-group",
                label { r#for: "username", "Username" }
                input {
                    id: "username",
                    r#type: "text",
                    placeholder: "Enter username",
                    value: "{username}",
                    oninput: move |evt| username.set(evt.value()),
                }
            }
            div { class: "form-group",
                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    r#type: "password",
                    placeholder: "Enter password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.data.key() == Key::Enter {
                            submit.call(AuthAction::Login);
                        }
                    },
                }
            }

            button {
                disabled: busy(),
                onclick: move |_| submit.call(AuthAction::Login),
                "Login"
            }
            button {
                disabled: busy(),
                onclick: move |_| submit.call(AuthAction::Register),
                "Register"
            }

            if let Some(notice) = notice() {
                div { class: "{notice.class()}", "{notice.text}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct AuthTestHandles {
    submit: Rc<RefCell<Option<Callback<AuthAction>>>>,
    fields: Rc<RefCell<Option<(Signal<String>, Signal<String>)>>>,
}

#[cfg(test)]
impl AuthTestHandles {
    pub(crate) fn register(
        &self,
        submit: Callback<AuthAction>,
        username: Signal<String>,
        password: Signal<String>,
    ) {
        *self.submit.borrow_mut() = Some(submit);
        *self.fields.borrow_mut() = Some((username, password));
    }

    pub(crate) fn submit(&self) -> Callback<AuthAction> {
        (*self.submit.borrow()).expect("auth submit registered")
    }

    pub(crate) fn fill(&self, name: &str, secret: &str) {
        let (mut username, mut password) =
            (*self.fields.borrow()).expect("auth fields registered");
        username.set(name.to_owned());
        password.set(secret.to_owned());
    }
}
