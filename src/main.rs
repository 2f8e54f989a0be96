use std::sync::Arc;

use color_eyre::Result;
use tempbridge::api::{self, AppState};
use tempbridge::broker::BrokerConnection;
use tempbridge::config::BridgeConfig;
use tempbridge::publisher::{PublisherHandle, PUBLISH_INTERVAL};
use tracing::{error, info};

const CLIENT_ID: &str = "tempbridge";

#[tokio::main]
async fn main() -> Result<()> {
    tempbridge::setup()?;

    let config = BridgeConfig::load_or_default();

    info!(
        "Connecting to MQTT Broker at {}:{}",
        config.broker.host, config.broker.port
    );
    let mut broker = BrokerConnection::new(&config.broker, CLIENT_ID);
    // Connection failure is logged but never fatal; endpoints may still be
    // invoked against an unconnected client.
    if let Err(e) = broker.connect().await {
        error!("{e}");
    }

    let state = AppState::new(
        Arc::new(broker),
        Arc::new(PublisherHandle::new(PUBLISH_INTERVAL)),
        config.broker.topic.clone(),
    );
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http.port)).await?;
    info!("Control API listening on port {}", config.http.port);
    axum::serve(listener, app).await?;

    Ok(())
}
