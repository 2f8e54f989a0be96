use chrono::NaiveDateTime;
use std::fmt;

/// An incoming MQTT message as seen by the subscriber, stamped on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedMessage {
    topic: String,
    payload: String,
    received_at: NaiveDateTime,
}

impl ReceivedMessage {
    pub fn from_topic(topic: String, payload: &[u8]) -> Self {
        ReceivedMessage {
            topic,
            payload: String::from_utf8_lossy(payload).into_owned(),
            received_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for ReceivedMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}: {}", self.received_at, self.topic, self.payload)
    }
}
