//! Application entry point for quest-site.
//!
//! Loads configuration, seeds the store and serves the API.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use dotenv::dotenv;
use log::debug;
use log::info;
use quest_site::config::Config;
use quest_site::error::AppError;
use quest_site::logging::setup_logging;
use quest_site::notifier::LogNotifier;
use quest_site::repository::Repository;
use quest_site::repository::seed::CatalogSeed;
use quest_site::server;
use quest_site::server::state::AppState;
use quest_site::service::Services;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config()?;
    let repo = setup_repository(&config, init_start).await?;
    let services = setup_services(&config, repo);
    run(&config, services, init_start).await
}

fn load_config() -> Result<Config> {
    let mut config = Config::new();
    config.load()?;
    setup_logging(&config)?;
    debug!("Loaded configuration: {config:?}");
    info!("Starting quest-site...");
    Ok(config)
}

async fn setup_repository(config: &Config, init_start: Instant) -> Result<Arc<Repository>> {
    let seed = match &config.seed_path {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            CatalogSeed::from_file(path)
        }
        None => CatalogSeed::builtin(),
    }
    .map_err(|e| AppError::ConfigurationError { msg: e.to_string() })?;

    let repo = Repository::seeded(seed).await?;
    info!(
        "Repository setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );
    Ok(Arc::new(repo))
}

fn setup_services(config: &Config, repo: Arc<Repository>) -> Arc<Services> {
    debug!("Setting up Services...");
    Arc::new(Services::new(repo, Arc::new(LogNotifier), &config.public_url))
}

async fn run(config: &Config, services: Arc<Services>, init_start: Instant) -> Result<()> {
    let app = server::router(AppState::new(services));

    let address = config.bind_address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;

    info!(
        "quest-site is up in {:.2}s. Press Ctrl+C to stop.",
        init_start.elapsed().as_secs_f64()
    );
    server::serve(listener, app, server::shutdown_signal()).await?;
    info!("Server stopped.");

    Ok(())
}
