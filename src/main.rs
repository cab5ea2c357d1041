// src/main.rs
use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;
use wttr_weather::config::Config;
use wttr_weather::runtime;
use wttr_weather::server::{Server, SERVER_NAME, SERVER_VERSION};
use wttr_weather::weather::WeatherClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. LOGGING
    // stdout carries the protocol. Logs go to stderr only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. CONFIG
    let config = Config::from_env()?;
    info!(base_url = %config.base_url, timeout = ?config.timeout, "{} v{} starting", SERVER_NAME, SERVER_VERSION);

    // 3. WIRE UP
    let server = Server::new(WeatherClient::new(&config)?);

    // 4. SERVE
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    runtime::serve(&server, stdin, stdout).await
}
