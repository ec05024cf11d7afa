use log::{error, info};
use tokio::net::TcpListener;

use ledger_wiki::logger::Logger;
use ledger_wiki::{create_router, AppState, Config, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env()?;
    let state = AppState::from_config(&config).map_err(|e| {
        error!("Startup failed: {}", e);
        e
    })?;
    info!("Serving pages from {:?}", config.data_dir);

    let app = create_router(state);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Wiki listening on http://{}", addr);
    axum::serve(listener, app).await.map_err(WikiError::from)
}
