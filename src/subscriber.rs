//! Subscribe-and-log event loop for the standalone subscriber process.
//!
//! Runs against its own broker connection, outside the control API's process
//! boundary. The loop blocks on the client's event primitive rather than
//! spinning: subscription happens on every session ack (so it survives the
//! transport reconnecting underneath), incoming messages are logged and
//! discarded, and connection errors back off briefly before the next poll.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use tokio::time;
use tracing::{debug, error, info};

use crate::broker::ReceivedMessage;
use crate::config::BrokerSettings;

const CLIENT_ID: &str = "tempbridge-subscriber";
const KEEP_ALIVE: Duration = Duration::from_secs(5);
const REQUEST_CAPACITY: usize = 100;
const POLL_ERROR_DELAY: Duration = Duration::from_secs(1);

/// Connects, subscribes to the configured topic and logs messages forever.
pub async fn run(settings: &BrokerSettings) {
    let mut options = MqttOptions::new(CLIENT_ID, &settings.host, settings.port);
    options.set_keep_alive(KEEP_ALIVE);

    let (client, mut event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);

    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                info!("Connected with result code {:?}", ack.code);
                if let Err(e) = client.subscribe(&settings.topic, QoS::AtMostOnce).await {
                    error!("Failed to subscribe to {}: {e}", settings.topic);
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                let message = ReceivedMessage::from_topic(publish.topic, &publish.payload);
                info!("Received temperature: {}", message.payload());
                debug!("{message}");
            }
            Ok(event) => debug!("Broker event: {:?}", event),
            Err(e) => {
                error!("Connection error: {e}");
                time::sleep(POLL_ERROR_DELAY).await;
            }
        }
    }
}
