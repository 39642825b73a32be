use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, AuthService, Clock, GameLoopService, StatsService};
use storage::ApiConfig;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
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

#[derive(Debug, Clone, PartialEq, Eq)]
enum Backend {
    Http(ApiConfig),
    Offline,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <url>] [--timeout-secs <n>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {}", storage::http::DEFAULT_API_URL);
    eprintln!("  --timeout-secs {}", storage::http::DEFAULT_TIMEOUT_SECS);
    eprintln!();
    eprintln!("  --offline keeps accounts and attempts in memory for this run only.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MONSTER_API_URL, MONSTER_HTTP_TIMEOUT_SECS, MONSTER_OFFLINE=1, RUST_LOG");
}

enum Parsed {
    Run(Backend),
    Help,
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn parse_args(
    args: &mut impl Iterator<Item = String>,
    defaults: ApiConfig,
    offline_default: bool,
) -> Result<Parsed, ArgsError> {
    let mut config = defaults;
    let mut offline = offline_default;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api" => {
                let value = require_value(args, "--api")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidApiUrl { raw: value });
                }
                config.base_url = value;
            }
            "--timeout-secs" => {
                let value = require_value(args, "--timeout-secs")?;
                let secs: u64 = value
                    .parse()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ArgsError::InvalidTimeout { raw: value.clone() })?;
                config.timeout = Duration::from_secs(secs);
            }
            "--offline" => offline = true,
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Parsed::Run(if offline {
        Backend::Offline
    } else {
        Backend::Http(config)
    }))
}

fn build_services(
    backend: &Backend,
    clock: Clock,
) -> Result<AppServices, Box<dyn std::error::Error>> {
    match backend {
        Backend::Http(config) => {
            let services = AppServices::http(config, clock).map_err(|err| {
                if matches!(err, storage::HttpInitError::InvalidBaseUrl { .. }) {
                    Box::new(ArgsError::InvalidApiUrl {
                        raw: config.base_url.clone(),
                    }) as Box<dyn std::error::Error>
                } else {
                    err.into()
                }
            })?;
            log::info!("using backend at {}", config.base_url);
            Ok(services)
        }
        Backend::Offline => {
            log::info!("offline mode: progress is kept in memory only");
            Ok(AppServices::in_memory(clock))
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = parse_args(&mut argv, ApiConfig::from_env(), env_flag("MONSTER_OFFLINE"))
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    let backend = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(backend) => backend,
    };

    let services = build_services(&backend, Clock::system())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Monster Math")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
