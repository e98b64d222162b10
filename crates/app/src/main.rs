use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use cardbook_core::{
    api::ApiClient,
    card::CardNameRegistry,
    catalog::{self, Facets, FilterState},
    config::{self, AppConfig},
    session::{navigation_gate, GateView, SessionAction, SessionStore},
    workflow::load_catalog,
};
use tracing::{error, info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    info!(
        api = %config.api_base_url,
        backend = ?config.storage_backend,
        "Configuration loaded"
    );

    let storage = config.build_storage()?;
    let store = SessionStore::new();
    let gate = navigation_gate(store.rehydrate(storage.as_ref()).await);
    info!(?gate, screen = ?gate.initial_screen(), "Navigation resolved");
    if gate != GateView::Protected {
        return Ok(());
    }

    let api = ApiClient::new(config.api_base_url.clone(), storage.clone())?;
    let names = CardNameRegistry::new(storage);
    match load_catalog(&api, &names).await {
        Ok(cards) => {
            let facets = Facets::from_records(&cards);
            let visible = catalog::apply(&cards, &FilterState::default());
            let server_names: Vec<&str> = cards.iter().map(|card| card.card_name.as_str()).collect();
            let suggestions = names.all_names(&server_names).await;
            info!(
                cards = visible.len(),
                banks = facets.banks.len(),
                holders = facets.holders.len(),
                suggestions = suggestions.len(),
                "Catalog ready"
            );
        }
        Err(err) if err.is_unauthorized() => {
            let gate = navigation_gate(store.dispatch(SessionAction::Logout));
            warn!(?gate, "Session expired; sign in again");
        }
        Err(err) => error!(%err, "Loading card catalog failed"),
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("cardbook.log"))?;

    let env_filter = EnvFilter::from_default_env();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stdout);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}
