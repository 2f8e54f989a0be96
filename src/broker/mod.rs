//! # Broker Module
//!
//! Everything that talks MQTT. [`connection`] wraps the async client with the
//! bounded connect retry used at startup and the publish path shared by the
//! background loop and the HTTP handlers. [`message`] is the subscriber-side
//! view of an incoming message.
//!
//! The broker itself is an external collaborator reached by host and port;
//! this module never assumes more than a publish/subscribe service with
//! named topics.

pub mod connection;
pub mod message;

pub use connection::{BrokerConnection, ConnectError, PublishError};
pub use message::ReceivedMessage;
