//! # Control API Module
//!
//! The HTTP surface of the bridge. Three control operations plus a status
//! probe, all JSON in and out:
//!
//! - `POST /start` - begin the background publishing loop
//! - `POST /stop` - request cooperative cancellation of the loop
//! - `POST /publish` - forward a caller-supplied temperature to the broker
//! - `GET /status` - report whether the loop is running
//!
//! Handlers borrow everything they touch from [`AppState`]; there is no
//! ambient process-wide state. Error responses are shaped by [`ApiError`].

pub mod error;
pub mod handlers;

pub use error::ApiError;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::broker::BrokerConnection;
use crate::publisher::PublisherHandle;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<BrokerConnection>,
    pub publisher: Arc<PublisherHandle>,
    pub topic: String,
}

impl AppState {
    pub fn new(broker: Arc<BrokerConnection>, publisher: Arc<PublisherHandle>, topic: String) -> Self {
        AppState {
            broker,
            publisher,
            topic,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/start", post(handlers::start_publishing))
        .route("/stop", post(handlers::stop_publishing))
        .route("/publish", post(handlers::publish_custom))
        .route("/status", get(handlers::status))
        .with_state(state)
}
