use std::process;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vellum::app_state::AppState;
use vellum::cli;
use vellum::config::Settings;
use vellum::session_store::SessionStore;

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,vellum=info,appwrite_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    tracing::info!("Starting vellum v{}", env!("CARGO_PKG_VERSION"));

    let state = match AppState::initialize(settings) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Service wiring failed: {}", e);
            eprintln!("ERROR: Failed to initialize services: {}", e);
            process::exit(1);
        }
    };

    let store = SessionStore::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = cli::run(&state, &store, args).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
