mod cli;
mod commands;
mod config;
mod constants;
mod error;
mod format;
mod handler;
mod input;
mod models;
mod services;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    cli::run().await;
}
