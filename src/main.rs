use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use mfl_league_client::config::Config;
use mfl_league_client::mfl::HttpTransport;
use mfl_league_client::trigger::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let transport = HttpTransport::new(config.http_timeout())?;
    let endpoints = config.endpoints()?;
    info!(
        "League hosts: login={}, export={} (timeout {:?})",
        config.login_url,
        config.export_url,
        config.http_timeout()
    );

    let state = AppState {
        transport: Arc::new(transport),
        endpoints,
        credentials: config.credentials(),
    };
    let app = trigger::router(state);
    let addr: SocketAddr = config.trigger_addr.parse()?;
    info!("Trigger listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
