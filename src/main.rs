//! Checkout server binary
//!
//! Configuration: an optional YAML file (first argument or
//! `CHECKOUT_CONFIG`), then environment variables. Log filtering follows
//! `RUST_LOG`.

use checkout::config::CheckoutConfig;
use checkout::server::ServerBuilder;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,checkout=debug,tower_http=debug")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CHECKOUT_CONFIG").ok());
    let config = CheckoutConfig::load(config_path.as_deref())?;

    for currency in [checkout::core::Currency::Usd, checkout::core::Currency::Eur] {
        if config.keys_for(currency).secret_key.is_empty() {
            tracing::warn!(%currency, "No gateway secret key configured; payments in this currency will fail");
        }
    }

    let addr = config.server.bind_addr();
    tracing::info!(base_url = %config.base_url, "Starting checkout server");

    ServerBuilder::new().with_config(config).serve(&addr).await
}
