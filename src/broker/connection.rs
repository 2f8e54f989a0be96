use std::sync::Mutex;
use std::time::Duration;

use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::config::BrokerSettings;

/// Number of connection attempts before giving up.
pub const CONNECT_ATTEMPTS: u32 = 3;

/// Fixed delay between connection attempts. No backoff, no jitter.
pub const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

const KEEP_ALIVE: Duration = Duration::from_secs(5);
const REQUEST_CAPACITY: usize = 100;
const POLL_ERROR_DELAY: Duration = Duration::from_secs(1);

// Connection errors
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Failed to connect to MQTT Broker after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        source: ConnectionError,
    },

    #[error("Broker connection was already established")]
    AlreadyConnected,
}

// Publish errors carry the underlying client cause
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct PublishError(#[from] rumqttc::ClientError);

/// Handle to the MQTT session used by the control API and the publisher loop.
///
/// Construction only prepares the client; [`BrokerConnection::connect`] must
/// run once to perform the retry window and hand the event loop to a
/// background driver. Publishing against a connection whose retries were
/// exhausted is allowed and simply queues into an unconnected client.
pub struct BrokerConnection {
    client: AsyncClient,
    // Taken by connect() when the driver task starts. Held behind a Mutex so
    // the connection is `Sync` and can be shared via `Arc` across tasks;
    // `rumqttc::EventLoop` is `Send` but not `Sync`.
    event_loop: Mutex<Option<EventLoop>>,
}

impl BrokerConnection {
    pub fn new(settings: &BrokerSettings, client_id: &str) -> Self {
        let mut options = MqttOptions::new(client_id, &settings.host, settings.port);
        options.set_keep_alive(KEEP_ALIVE);

        let (client, event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);

        BrokerConnection {
            client,
            event_loop: Mutex::new(Some(event_loop)),
        }
    }

    /// Attempts to establish the session, retrying up to [`CONNECT_ATTEMPTS`]
    /// times with [`CONNECT_RETRY_DELAY`] between attempts.
    ///
    /// Whatever the outcome, the event loop keeps being polled by a spawned
    /// driver task afterwards so queued publishes and acks drain. Exhaustion
    /// is reported to the caller, who decides whether it is fatal (the
    /// bridge logs it and continues).
    pub async fn connect(&mut self) -> Result<(), ConnectError> {
        let mut event_loop = self
            .event_loop
            .get_mut()
            .expect("event_loop mutex poisoned")
            .take()
            .ok_or(ConnectError::AlreadyConnected)?;

        let mut attempt = 1;
        let outcome = loop {
            match event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    info!("Connected to MQTT Broker with result code {:?}", ack.code);
                    break Ok(());
                }
                Ok(event) => debug!("Broker event before session ack: {:?}", event),
                Err(e) => {
                    if attempt >= CONNECT_ATTEMPTS {
                        break Err(ConnectError::RetriesExhausted {
                            attempts: CONNECT_ATTEMPTS,
                            source: e,
                        });
                    }
                    warn!(
                        "Connection failed: {e}, retrying in {} seconds...",
                        CONNECT_RETRY_DELAY.as_secs()
                    );
                    attempt += 1;
                    time::sleep(CONNECT_RETRY_DELAY).await;
                }
            }
        };

        // The client makes no progress unless its event loop is polled.
        tokio::spawn(async move {
            loop {
                if let Err(e) = event_loop.poll().await {
                    error!("MQTT connection error: {e}");
                    time::sleep(POLL_ERROR_DELAY).await;
                }
            }
        });

        outcome
    }

    /// Sends `payload` on `topic`, fire and forget (QoS 0, no retain).
    pub async fn publish(&self, topic: &str, payload: String) -> Result<(), PublishError> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await?;
        Ok(())
    }
}
