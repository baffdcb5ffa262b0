use anyhow::{Context, Result};
use cardgen::{handler::AppRouter, state::AppState};
use dotenv::dotenv;
use shared::{config::Config, utils::Logger};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _logger = Logger::new("cardgen", config.is_dev).context("Failed to initialize logger")?;

    let port = config.port;

    let state = AppState::new(&config).context("Failed to create AppState")?;

    info!("🚀 Server started successfully");

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    Ok(())
}
