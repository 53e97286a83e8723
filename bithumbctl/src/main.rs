//! Bithumb command-line client
//!
//! # Usage
//!
//! ```bash
//! # Public market data
//! bithumbctl ticker --order ETH
//! bithumbctl candlestick --interval 1h
//!
//! # Private endpoints read credentials from the environment
//! BITHUMB_CONNECT_KEY=... BITHUMB_SECRET_KEY=... bithumbctl balance --currency ALL
//! ```
//!
//! # Environment Variables
//!
//! - `BITHUMB_API_URL`: API base URL (default: https://api.bithumb.com)
//! - `BITHUMB_CONNECT_KEY`: connect key for private commands
//! - `BITHUMB_SECRET_KEY`: secret key for private commands
//! - `RUST_LOG`: log filter (default: bithumbctl=info,bithumb_connectors=info)

use bithumb_connectors::BithumbConfig;
use bithumbctl::{log_filter, Cli};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (stderr, so stdout stays valid JSON)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    // Load configuration
    let config = BithumbConfig::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.base_url,
        credentials = config.has_credentials(),
        "bithumbctl"
    );

    let output = bithumbctl::run(cli, config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
