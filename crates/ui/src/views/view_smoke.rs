use std::time::Duration;

use dioxus::prelude::{ReadableExt, WritableExt};

use math_core::model::{GameType, NewAttempt};
use services::{AuthAction, FEEDBACK_DELAY, GamePhase};
use storage::{AttemptRepository, AuthRepository, Credentials};

use super::test_harness::{
    ViewHarness, ViewKind, drive_dom, setup_view_harness, setup_view_harness_with_services,
    test_services,
};

fn attempt(question: &str, secs: f64, correct: bool) -> NewAttempt {
    NewAttempt {
        game_type: GameType::MissingNumber,
        question: question.to_owned(),
        time_taken_seconds: secs,
        solved_correctly: correct,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_renders_login_form() {
    let mut harness = setup_view_harness(ViewKind::Auth, None);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Login or Register to Play!"));
    assert!(html.contains("Enter username"));
    assert!(html.contains("Register"));
}

#[tokio::test(flavor = "current_thread")]
async fn auth_view_ignores_second_click_while_busy() {
    let mut harness = setup_view_harness(ViewKind::Auth, None);
    harness.rebuild();
    harness.drive_async().await;

    let handles = harness.auth_handles.clone().expect("auth handles");
    harness.dom.in_runtime(|| {
        handles.fill("nova", "star1");
        let submit = handles.submit();
        submit.call(AuthAction::Register);
        submit.call(AuthAction::Register);
    });
    harness.drive_async().await;
    drive_dom(&mut harness.dom);

    let html = harness.render();
    assert!(html.contains("Registration successful!"));
    assert!(!html.contains("Username already exists"));
}

#[tokio::test(flavor = "current_thread")]
async fn game_select_smoke_lists_every_game() {
    let mut harness = setup_view_harness(ViewKind::GameSelect, Some("nova"));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Welcome, nova! Pick a game."));
    for game_type in GameType::ALL {
        assert!(html.contains(game_type.title()), "missing {game_type}");
    }
    assert!(html.contains("Logout"));
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_starts_a_fresh_game() {
    let mut harness = setup_view_harness(ViewKind::Game("missing_number"), Some("nova"));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Welcome, nova!"));
    assert!(html.contains("Time: 0.0s"));
    assert!(html.contains("Score: 0"));
    assert!(html.contains("Streak: 0"));
    assert!(html.contains("Solved: 0"));
    assert!(html.contains("Check Answer!"));

    let question = harness
        .context
        .with_game(|game| game.puzzle().map(|puzzle| puzzle.question_text().to_owned()))
        .expect("puzzle dealt");
    assert!(html.contains(&question));
    assert_eq!(
        harness.context.with_game(|game| game.phase()),
        GamePhase::Playing
    );
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_draws_part_whole_diagram() {
    let mut harness = setup_view_harness(ViewKind::Game("part_whole"), Some("nova"));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("part-whole"));
    assert!(html.contains("cell--hidden"));
    assert!(html.contains('?'));
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_resumes_paused_game() {
    let mut harness = setup_view_harness(ViewKind::Game("more_or_less"), Some("nova"));
    harness.context.with_game(|game| {
        game.start_game(GameType::MoreOrLess).unwrap();
        let answer = game.puzzle().unwrap().answer().to_string();
        assert!(game.check_answer(&answer).unwrap().correct);
        game.pause();
    });

    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Score: 10"));
    assert!(html.contains("Solved: 1"));
    assert_eq!(
        harness.context.with_game(|game| game.phase()),
        GamePhase::Playing
    );
}

const SETTLE: Duration = Duration::from_millis(200);

fn current_question(harness: &ViewHarness) -> (String, i32) {
    harness.context.with_game(|game| {
        let puzzle = game.puzzle().expect("puzzle dealt");
        (puzzle.question_text().to_owned(), puzzle.answer())
    })
}

fn submit_answer(harness: &mut ViewHarness, input: &str) {
    let handles = harness.game_handles.clone().expect("game handles");
    harness.dom.in_runtime(|| {
        handles.answer().set(input.to_owned());
        handles.submit().call(());
    });
    drive_dom(&mut harness.dom);
}

fn answer_box(harness: &ViewHarness) -> String {
    let handles = harness.game_handles.clone().expect("game handles");
    harness.dom.in_runtime(|| handles.answer().peek().clone())
}

#[tokio::test(start_paused = true)]
async fn game_view_feedback_then_next_puzzle_or_retry() {
    let mut harness = setup_view_harness(ViewKind::Game("missing_number"), Some("nova"));
    harness.rebuild();

    let (_, answer) = current_question(&harness);
    submit_answer(&mut harness, &answer.to_string());

    let html = harness.render();
    assert!(html.contains("Score: 10"));
    assert!(html.contains("Awesome! You got it in 0.0s!"));
    assert_eq!(
        harness.context.with_game(|game| game.phase()),
        GamePhase::Advancing
    );

    harness.run_for(FEEDBACK_DELAY + SETTLE).await;

    let html = harness.render();
    assert!(!html.contains("Awesome!"));
    assert!(html.contains("Solved: 1"));
    assert_eq!(answer_box(&harness), "");
    assert_eq!(
        harness.context.with_game(|game| game.phase()),
        GamePhase::Playing
    );
    let (question, answer) = current_question(&harness);
    assert!(html.contains(&question));

    let wrong = (answer + 1).to_string();
    submit_answer(&mut harness, &wrong);

    let html = harness.render();
    assert!(html.contains("Oops! Try again!"));
    assert!(html.contains("Score: 10"));
    assert!(html.contains("Streak: 0"));
    assert_eq!(
        harness.context.with_game(|game| game.phase()),
        GamePhase::Retrying
    );

    harness.run_for(FEEDBACK_DELAY + SETTLE).await;

    let html = harness.render();
    assert!(!html.contains("Oops!"));
    assert!(html.contains(&question));
    assert_eq!(current_question(&harness).0, question);
    assert_eq!(answer_box(&harness), wrong);
    assert_eq!(
        harness.context.with_game(|game| game.phase()),
        GamePhase::Playing
    );
}

#[tokio::test(flavor = "current_thread")]
async fn game_view_smoke_rejects_unknown_game() {
    let mut harness = setup_view_harness(ViewKind::Game("long_division"), Some("nova"));
    harness.rebuild();

    let html = harness.render();
    assert!(
        html.contains("That game doesn&#39;t exist") || html.contains("That game doesn't exist")
    );
    assert!(html.contains("Choose a Game"));
}

#[tokio::test(flavor = "current_thread")]
async fn stats_view_smoke_renders_totals_and_rows() {
    let (services, repo) = test_services();
    repo.register(&Credentials::new("nova", "star1"))
        .await
        .expect("register");
    repo.save_attempt(&attempt("7 + ? = 12", 2.0, true))
        .await
        .expect("save");
    repo.save_attempt(&attempt("9 - ? = 4", 3.0, false))
        .await
        .expect("save");

    let mut harness =
        setup_view_harness_with_services(ViewKind::Stats, Some("nova"), services, repo);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Total Attempts: 2"));
    assert!(html.contains("Correct: 1"));
    assert!(html.contains("Accuracy: 50.0%"));
    assert!(html.contains("Best Time: 2.0s"));
    assert!(html.contains("correct-row"));
    assert!(html.contains("incorrect-row"));
    assert!(html.contains("7 + ? = 12"));
    assert!(html.contains("Choose a Game"));
}

#[tokio::test(flavor = "current_thread")]
async fn stats_view_smoke_alerts_when_stats_fail() {
    // No backend session, so the in-memory backend refuses the query.
    let mut harness = setup_view_harness(ViewKind::Stats, Some("nova"));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Failed to load statistics. Please try again."));
}
