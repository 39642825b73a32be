#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{FEEDBACK_DELAY, GameController, GameError, GamePhase};

use crate::context::{AppContext, CurrentUser};
use crate::routes::Route;
use crate::views::{LogoutButton, ViewError};
use crate::vm::{
    DiagramCellVm, FeedbackVm, GameBoardVm, Mascots, PuzzleVm, enter_game, format_timer,
};

#[component]
pub fn GameView(game_type: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let user = use_context::<CurrentUser>().0;

    let entered = use_hook({
        let ctx = ctx.clone();
        move || {
            ctx.with_game(|game| enter_game(game, &game_type))
                .map_err(|err| match err {
                    GameError::GameType(_) => ViewError::UnknownGame,
                    other => {
                        log::warn!("could not start game: {other}");
                        ViewError::Unknown
                    }
                })
        }
    });

    let mut board = use_signal({
        let ctx = ctx.clone();
        move || ctx.with_game(|game| GameBoardVm::from_controller(game))
    });
    let mut mascots = use_signal(Mascots::random);
    let mut answer = use_signal(String::new);
    let mut feedback = use_signal(|| None::<FeedbackVm>);
    let mut elapsed = use_signal(|| 0.0_f64);

    let timer_ctx = ctx.clone();
    use_future(move || {
        let mut display = timer_ctx.with_game(|game| game.timer_display());
        async move {
            elapsed.set(*display.borrow_and_update());
            while display.changed().await.is_ok() {
                let seconds = *display.borrow_and_update();
                elapsed.set(seconds);
            }
        }
    });

    let submit_ctx = ctx.clone();
    let submit = use_callback(move |()| {
        let input = answer.peek().clone();
        let Some(checked) = submit_ctx.with_game(|game| game.check_answer(&input)) else {
            return;
        };
        feedback.set(Some(FeedbackVm::from_checked(&checked)));
        board.set(submit_ctx.with_game(|game| GameBoardVm::from_controller(game)));

        let ctx = submit_ctx.clone();
        spawn(async move {
            tokio::time::sleep(FEEDBACK_DELAY).await;
            match ctx.with_game(GameController::continue_after_feedback) {
                Ok(Some(GamePhase::Advancing)) => {
                    answer.set(String::new());
                    mascots.set(Mascots::random());
                }
                Ok(_) => {}
                Err(err) => log::warn!("could not continue game: {err}"),
            }
            feedback.set(None);
            board.set(ctx.with_game(|game| GameBoardVm::from_controller(game)));
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<GameTestHandles>() {
                handles.register(submit, answer);
            }
        }
    }

    if let Err(err) = entered {
        return rsx! {
            div { class: "page page--game",
                h1 { "Monster Math" }
                p { class: "error", "{err.message()}" }
                button {
                    onclick: move |_| {
                        navigator.push(Route::GameSelect {});
                    },
                    "Choose a Game"
                }
            }
        };
    }

    let player = user().unwrap_or_default();
    let GameBoardVm {
        title,
        score,
        streak,
        solved,
        puzzle,
        accepting_answers,
    } = board();
    let pair = mascots();
    let stats_ctx = ctx.clone();
    let select_ctx = ctx.clone();

    rsx! {
        div { class: "page page--game",
            h1 { "{title}" }
            p { class: "subtitle", "Welcome, {player}!" }

            div { class: "timer", "{format_timer(elapsed())}" }

            div { class: "score-board",
                div { class: "score-item", "Score: {score}" }
                div { class: "score-item", "Streak: {streak}" }
                div { class: "score-item", "Solved: {solved}" }
            }

            div { class: "puzzle-box",
                div { class: "monster-display",
                    span { "{pair.monster}" }
                    " "
                    span { "{pair.alien}" }
                }
                match puzzle {
                    Some(PuzzleVm::Equation(text)) => rsx! {
                        div { class: "puzzle-equation", "{text}" }
                    },
                    Some(PuzzleVm::Diagram { top, left, right }) => rsx! {
                        div { class: "part-whole",
                            DiagramCell { cell: top, whole: true }
                            DiagramCell { cell: left, whole: false }
                            DiagramCell { cell: right, whole: false }
                        }
                    },
                    None => rsx! {
                        div { class: "puzzle-equation", "Loading..." }
                    },
                }
            }

            div { class: "form-group",
                input {
                    id: "answer",
                    r#type: "number",
                    placeholder: "Enter your answer",
                    autofocus: true,
                    value: "{answer}",
                    oninput: move |evt| answer.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.data.key() == Key::Enter {
                            submit.call(());
                        }
                    },
                }
            }

            button {
                disabled: !accepting_answers,
                onclick: move |_| submit.call(()),
                "Check Answer! 🚀"
            }

            if let Some(feedback) = feedback() {
                div { class: "{feedback.class()}", "{feedback.message}" }
            }

            div { class: "nav-buttons",
                button {
                    onclick: move |_| {
                        select_ctx.with_game(GameController::end);
                        navigator.push(Route::GameSelect {});
                    },
                    "Change Game"
                }
                button {
                    onclick: move |_| {
                        stats_ctx.with_game(GameController::pause);
                        navigator.push(Route::Stats {});
                    },
                    "View Stats"
                }
                LogoutButton {}
            }
        }
    }
}

#[component]
fn DiagramCell(cell: DiagramCellVm, whole: bool) -> Element {
    let mut class = String::from("cell");
    if whole {
        class.push_str(" cell--whole");
    }
    if cell.hidden {
        class.push_str(" cell--hidden");
    }
    rsx! {
        div { class: "{class}", "{cell.text}" }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct GameTestHandles {
    submit: Rc<RefCell<Option<Callback<()>>>>,
    answer: Rc<RefCell<Option<Signal<String>>>>,
}

#[cfg(test)]
impl GameTestHandles {
    pub(crate) fn register(&self, submit: Callback<()>, answer: Signal<String>) {
        *self.submit.borrow_mut() = Some(submit);
        *self.answer.borrow_mut() = Some(answer);
    }

    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("game submit registered")
    }

    pub(crate) fn answer(&self) -> Signal<String> {
        (*self.answer.borrow()).expect("game answer registered")
    }
}
