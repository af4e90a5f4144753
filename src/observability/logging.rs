//! Structured logging.
//!
//! # Responsibilities
//! - Initialize a tracing subscriber for hosts and tests
//! - Honour `RUST_LOG`, falling back to a caller-supplied filter

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber.
///
/// Returns false if a global subscriber was already set, which makes it safe
/// to call from every test.
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
