//! Stark Browser: a minimal tabbed web browser with a built-in ad-request blocker.
//!
//! Entry point: parses the command line, loads settings and opens the browser
//! window. Built without the `gui` feature, it resolves the given input and
//! prints where the browser would go.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stark_browser::app::App;
use stark_browser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use stark_browser::types::settings::SessionOverrides;

#[derive(Parser)]
#[command(name = "stark-browser", version)]
#[command(about = "A minimal tabbed web browser with a built-in ad-request blocker")]
struct Cli {
    /// URL or search terms to open in the first tab
    input: Option<String>,

    /// Path to the settings file
    #[arg(short, long)]
    config: Option<String>,

    /// Start with the light theme (not saved)
    #[arg(long)]
    light: bool,

    /// Disable ad blocking for this session (not saved)
    #[arg(long)]
    no_adblock: bool,
}

fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stark_browser=info")),
        )
        .init();
}

fn build_app(cli: &Cli) -> App {
    let mut engine = SettingsEngine::new(cli.config.clone());
    if let Err(e) = engine.load() {
        warn!("Using default settings; {} will not be modified: {}", engine.get_config_path(), e);
    }
    info!("Settings file: {}", engine.get_config_path());

    let overrides = SessionOverrides {
        dark_mode: cli.light.then_some(false),
        ad_blocking: cli.no_adblock.then_some(false),
    };
    if !overrides.is_empty() {
        info!(?overrides, "Applying command-line overrides for this session");
        engine.set_overrides(overrides);
    }

    App::new(engine)
}

#[cfg(feature = "gui")]
fn main() {
    let cli = Cli::parse();
    init_logger();

    let mut app = build_app(&cli);
    if let Some(input) = cli.input.as_deref() {
        app.open_startup_input(input);
    }

    if let Err(e) = stark_browser::ui::webview_app::run(app) {
        eprintln!("stark-browser: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use stark_browser::services::url_resolver;

    let cli = Cli::parse();
    init_logger();

    let mut app = build_app(&cli);
    let Some(input) = cli.input.as_deref() else {
        println!("{}", app.current_url().unwrap_or_default());
        return;
    };

    let search_base = app.settings().general.search_url.clone();
    let Some(url) = url_resolver::resolve_input(input, &search_base) else {
        eprintln!("stark-browser: nothing to open");
        std::process::exit(2);
    };

    if app.allow_navigation(&url) {
        println!("{}", url);
    } else {
        println!("{} (blocked)", url);
        std::process::exit(1);
    }
}
