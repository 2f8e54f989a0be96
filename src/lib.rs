//! # tempbridge
//!
//! A small bridge between an HTTP control surface and an MQTT broker.
//!
//! The crate ships two binaries that share this library:
//!
//! - `tempbridge`: connects to the broker, then serves the control API.
//!   `POST /start` and `POST /stop` drive a background loop that publishes
//!   randomized temperature readings, and `POST /publish` forwards a
//!   caller-supplied value directly to the broker.
//! - `subscriber`: an independent process that subscribes to the same topic
//!   and logs every message it receives.
//!
//! ```text
//! src/
//! ├── config.rs     - TOML configuration with deployment defaults
//! ├── broker/       - broker connection with bounded connect retry
//! ├── publisher/    - supervised background publishing task
//! ├── api/          - axum routes, handlers and error mapping
//! └── subscriber.rs - subscribe-and-log event loop
//! ```

pub mod api;
pub mod broker;
pub mod config;
pub mod publisher;
pub mod subscriber;

use color_eyre::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Process-wide setup shared by both binaries: error reporting and logging.
pub fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
