use std::sync::Arc;

use fancyfam_cards::config::AppConfig;
use fancyfam_cards::core::logging;
use fancyfam_cards::core::server::CardService;
use fancyfam_cards::core::storage::FileCardStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();

    // Initialize logging
    let _log_guard = logging::init(&config.log_dir());
    tracing::info!("{} v{} starting", fancyfam_cards::NAME, fancyfam_cards::VERSION);

    let store = FileCardStore::open(config.cards_dir()).await?;
    tracing::info!(dir = %store.dir().display(), "Using file card store");

    let mut service = CardService::new(config.server.clone(), Arc::new(store));
    let addr = service.start().await?;
    tracing::info!("Serving cards on http://{addr}");

    tokio::signal::ctrl_c().await?;
    service.stop().await;

    Ok(())
}
