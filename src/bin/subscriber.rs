use color_eyre::Result;
use tempbridge::config::BridgeConfig;
use tempbridge::subscriber;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tempbridge::setup()?;

    let config = BridgeConfig::load_or_default();
    info!(
        "Subscribing to {} at {}:{}",
        config.broker.topic, config.broker.host, config.broker.port
    );

    subscriber::run(&config.broker).await;
    Ok(())
}
