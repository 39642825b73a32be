use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use math_core::time::fixed_now;
use services::{AppServices, AuthService, Clock, GameLoopService, StatsService};
use storage::{InMemoryRepository, Storage};

use crate::context::{AppContext, CurrentUser, UiApp, build_app_context};
use crate::views::auth::AuthTestHandles;
use crate::views::game::GameTestHandles;
use crate::views::{AuthView, GameSelectView, GameView, StatsView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn stats(&self) -> Arc<StatsService> {
        self.services.stats()
    }

    fn game_loop(&self) -> Arc<GameLoopService> {
        self.services.game_loop()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Auth,
    GameSelect,
    Game(&'static str),
    Stats,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: AppContext,
    view: ViewKind,
    user: Option<String>,
    auth_handles: Option<AuthTestHandles>,
    game_handles: Option<GameTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.view.clone());
    let user = props.user.clone();
    use_context_provider(|| CurrentUser(Signal::new(user)));
    if let Some(handles) = props.auth_handles.clone() {
        use_context_provider(|| handles);
    }
    if let Some(handles) = props.game_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Auth => rsx! { AuthView {} },
        ViewKind::GameSelect => rsx! { GameSelectView {} },
        ViewKind::Game(game_type) => rsx! { GameView { game_type: game_type.to_owned() } },
        ViewKind::Stats => rsx! { StatsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub context: AppContext,
    pub auth_handles: Option<AuthTestHandles>,
    pub game_handles: Option<GameTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Keep polling the dom until `duration` of tokio time has passed.
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = tokio::time::Instant::now() + duration;
        while tokio::time::Instant::now() < deadline {
            self.drive_async().await;
        }
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over a fresh in-memory backend, plus the repository for seeding.
pub fn test_services() -> (AppServices, InMemoryRepository) {
    let clock = Clock::fixed(fixed_now());
    let repo = InMemoryRepository::new().with_clock(clock);
    let storage = Storage::from_in_memory(repo.clone());
    let services = AppServices::new(&storage, clock);
    (services, repo)
}

pub fn setup_view_harness(view: ViewKind, user: Option<&str>) -> ViewHarness {
    let (services, repo) = test_services();
    setup_view_harness_with_services(view, user, services, repo)
}

pub fn setup_view_harness_with_services(
    view: ViewKind,
    user: Option<&str>,
    services: AppServices,
    repo: InMemoryRepository,
) -> ViewHarness {
    let app: Arc<dyn UiApp> = Arc::new(TestApp { services });
    let context = build_app_context(&app);
    let auth_handles = match view {
        ViewKind::Auth => Some(AuthTestHandles::default()),
        _ => None,
    };
    let game_handles = match view {
        ViewKind::Game(_) => Some(GameTestHandles::default()),
        _ => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            context: context.clone(),
            view,
            user: user.map(str::to_owned),
            auth_handles: auth_handles.clone(),
            game_handles: game_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        repo,
        context,
        auth_handles,
        game_handles,
    }
}
