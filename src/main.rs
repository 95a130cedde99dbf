use anyhow::Result;
use tracing::info;
use varest_receiver::{config, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.server.logs) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!(
        level = %config.server.logs.level,
        log_file = config.server.logs.file.as_deref().unwrap_or("-"),
        "Starting {} v{}",
        server::types::SERVICE_NAME,
        env!("CARGO_PKG_VERSION")
    );

    server::run(config).await?;

    Ok(())
}
