mod audio;
mod speech;

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing_subscriber::EnvFilter;

use sadhana_core::Clock;
use sadhana_core::model::AppSettings;
use services::navigation::{NavigationReceiver, create_navigation_channel};
use services::sessions::SessionRuntime;
use services::Navigator;
use ui::{App, UiApp, build_app_context};

use crate::audio::RodioAudioHost;
use crate::speech::TtsSpeechHost;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidRate { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidRate { raw } => {
                write!(f, "invalid --narration-rate value: {raw}")
            }
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

#[derive(Debug, Default)]
struct Args {
    sounds_dir: Option<PathBuf>,
    narration_rate: Option<f32>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--sounds-dir <path>] [--narration-rate <rate>]");
    eprintln!();
    eprintln!("Defaults come from the saved config; flags override for this run.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SADHANA_SOUNDS_DIR");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            sounds_dir: std::env::var("SADHANA_SOUNDS_DIR").ok().map(PathBuf::from),
            ..Self::default()
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--sounds-dir" => {
                    let value = require_value(args, "--sounds-dir")?;
                    parsed.sounds_dir = Some(PathBuf::from(value));
                }
                "--narration-rate" => {
                    let value = require_value(args, "--narration-rate")?;
                    let rate: f32 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidRate { raw: value.clone() })?;
                    parsed.narration_rate = Some(rate);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

struct DesktopApp {
    settings: AppSettings,
    runtime: Arc<SessionRuntime>,
    navigation: Mutex<Option<NavigationReceiver>>,
}

impl UiApp for DesktopApp {
    fn settings(&self) -> AppSettings {
        self.settings.clone()
    }

    fn session_runtime(&self) -> Arc<SessionRuntime> {
        Arc::clone(&self.runtime)
    }

    fn take_navigation(&self) -> Option<NavigationReceiver> {
        self.navigation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    // Saved settings first, then per-run overrides.
    let mut settings: AppSettings = confy::load("sadhana", None).unwrap_or_default();
    if let Some(sounds_dir) = args.sounds_dir {
        settings.sounds_dir = sounds_dir;
    }
    if let Some(rate) = args.narration_rate {
        settings.narration_rate = rate;
    }
    let settings = settings.normalized();

    let (navigator, navigation_rx) = create_navigation_channel();
    let audio_host = Arc::new(RodioAudioHost::new(settings.sounds_dir.clone()));
    let speech_host = Arc::new(TtsSpeechHost::new());
    let runtime = Arc::new(SessionRuntime::new(
        Clock::default_clock(),
        audio_host,
        speech_host,
        Arc::new(navigator) as Arc<dyn Navigator>,
        settings.narration_rate,
    ));

    let app = DesktopApp {
        settings,
        runtime,
        navigation: Mutex::new(Some(navigation_rx)),
    };
    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Sadhana")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
