//! todo-server binary: load config, start serving, stop on Ctrl-C.

use anyhow::Context;
use clap::Parser;

use todo_server::config::CliArgs;
use todo_server::{build_state, router, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliArgs::parse().resolve().context("failed to load config")?;

    rolling_logger::init_logger(config.log_dir.as_deref(), "todo-server")
        .map_err(|e| anyhow::anyhow!("failed to init logger: {}", e))?;
    tracing::debug!(?config, "config loaded");

    let state = build_state(&config).await.context("failed to open storage")?;
    let mut server = Server::new(router(state, &config.static_dir));
    let url = server.start(config.bind).await?;
    tracing::info!("App URL is: {}", url);

    tokio::signal::ctrl_c().await.context("failed to wait for Ctrl-C")?;
    tracing::info!("shutting down");
    server.stop(config.shutdown_timeout()).await;
    Ok(())
}
