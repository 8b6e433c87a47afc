use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habla=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Habla voice chat");

    let config = habla::config::AppConfig::from_env();
    config
        .validate()
        .map_err(habla::HablaError::ConfigError)
        .context("invalid configuration")?;

    // Run the GUI application
    habla::ui::run(config).map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
