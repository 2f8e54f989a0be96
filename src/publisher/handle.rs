//! Publisher Handle - lifecycle of the background publishing task
//!
//! Owns the running state the control API toggles. The task is supervised:
//! its join handle and cancellation token are retained so a stop request
//! cancels deterministically instead of waiting on a polled flag.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::broker::BrokerConnection;

use super::reading::Reading;

/// Cadence of the background loop in production wiring.
pub const PUBLISH_INTERVAL: Duration = Duration::from_secs(5);

// Publisher lifecycle errors, surfaced to HTTP clients as conflicts
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error("Publisher loop is already running")]
    AlreadyRunning,

    #[error("Publisher loop is not running")]
    NotRunning,
}

struct ActivePublisher {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Handle for starting and stopping the publishing loop.
///
/// A single instance is created at startup and injected into the HTTP
/// handlers through the shared application state. The mutex serializes
/// state transitions, so concurrent start requests resolve to exactly one
/// success and one conflict.
pub struct PublisherHandle {
    interval: Duration,
    active: Mutex<Option<ActivePublisher>>,
}

impl PublisherHandle {
    pub fn new(interval: Duration) -> Self {
        PublisherHandle {
            interval,
            active: Mutex::new(None),
        }
    }

    /// Spawns the publishing loop against `topic`.
    ///
    /// # Errors
    ///
    /// [`PublisherError::AlreadyRunning`] if a loop is already active.
    pub async fn start(
        &self,
        broker: Arc<BrokerConnection>,
        topic: String,
    ) -> Result<(), PublisherError> {
        let mut active = self.active.lock().await;
        if active
            .as_ref()
            .is_some_and(|publisher| !publisher.task.is_finished())
        {
            return Err(PublisherError::AlreadyRunning);
        }

        let cancel = CancellationToken::new();
        let task = tokio::spawn(publish_readings(
            broker,
            topic,
            self.interval,
            cancel.clone(),
        ));
        *active = Some(ActivePublisher { cancel, task });

        info!("Started publishing temperature data");
        Ok(())
    }

    /// Requests cooperative cancellation of the running loop.
    ///
    /// The task observes the token during its sleep, so termination is
    /// bounded by one publish interval.
    ///
    /// # Errors
    ///
    /// [`PublisherError::NotRunning`] if no loop is active.
    pub async fn stop(&self) -> Result<(), PublisherError> {
        let mut active = self.active.lock().await;
        match active.take() {
            Some(publisher) => {
                publisher.cancel.cancel();
                info!("Stopped publishing temperature data");
                Ok(())
            }
            None => Err(PublisherError::NotRunning),
        }
    }

    pub async fn is_running(&self) -> bool {
        self.active
            .lock()
            .await
            .as_ref()
            .is_some_and(|publisher| !publisher.task.is_finished())
    }
}

/// One iteration per interval: generate, publish, log, sleep. Publish
/// failures are logged and never stop the loop.
async fn publish_readings(
    broker: Arc<BrokerConnection>,
    topic: String,
    interval: Duration,
    cancel: CancellationToken,
) {
    loop {
        let reading = Reading::random();
        match broker.publish(&topic, reading.to_string()).await {
            Ok(()) => info!("Published temperature: {reading} to topic: {topic}"),
            Err(e) => warn!("Failed to publish: {e}"),
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = time::sleep(interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrokerSettings;

    fn test_broker() -> Arc<BrokerConnection> {
        Arc::new(BrokerConnection::new(
            &BrokerSettings::default(),
            "tempbridge-test",
        ))
    }

    fn test_handle() -> PublisherHandle {
        PublisherHandle::new(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn starting_twice_yields_exactly_one_conflict() {
        let handle = test_handle();
        let broker = test_broker();

        handle
            .start(broker.clone(), "temperature".to_string())
            .await
            .expect("first start");
        let second = handle.start(broker, "temperature".to_string()).await;

        assert!(matches!(second, Err(PublisherError::AlreadyRunning)));
        assert!(handle.is_running().await);

        handle.stop().await.expect("stop");
    }

    #[tokio::test]
    async fn stopping_while_stopped_is_a_conflict() {
        let handle = test_handle();
        assert!(matches!(
            handle.stop().await,
            Err(PublisherError::NotRunning)
        ));
    }

    #[tokio::test]
    async fn stop_transitions_to_stopped_and_allows_restart() {
        let handle = test_handle();
        let broker = test_broker();

        handle
            .start(broker.clone(), "temperature".to_string())
            .await
            .expect("start");
        handle.stop().await.expect("stop");
        assert!(!handle.is_running().await);

        handle
            .start(broker, "temperature".to_string())
            .await
            .expect("restart after stop");
        handle.stop().await.expect("second stop");
    }

    #[tokio::test]
    async fn cancellation_terminates_the_loop() {
        let cancel = CancellationToken::new();
        let task = tokio::spawn(publish_readings(
            test_broker(),
            "temperature".to_string(),
            Duration::from_millis(5),
            cancel.clone(),
        ));

        cancel.cancel();
        time::timeout(Duration::from_secs(1), task)
            .await
            .expect("loop did not terminate after cancellation")
            .expect("loop task panicked");
    }
}
