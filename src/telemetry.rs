//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ServerConfig;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `server.log_level` when set. Production emits JSON
/// lines, everything else the human-readable format.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(filter).with_target(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = if server.is_production() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
