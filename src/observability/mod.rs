//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! parser / config / stream
//!     → tracing events (structured fields: line, method, directive, ...)
//!     → logging.rs (subscriber installed by the host application)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is opt-in
//! - Per-line events are `trace`, outcomes `debug`, tolerated anomalies `warn`

pub mod logging;
