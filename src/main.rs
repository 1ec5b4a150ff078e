use std::sync::Arc;

use livepost::config::load_config;
use livepost::logging;
use livepost::registry::Registry;
use livepost::storage::MemoryPostStore;
use livepost::transport::start_websocket_server;

#[tokio::main]
async fn main() {
    let config = load_config().expect("Failed to load configuration");
    logging::init(&config.log.level);

    let registry = Arc::new(Registry::new());
    let store = Arc::new(MemoryPostStore::new());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    start_websocket_server(&addr, registry, store).await;
}
