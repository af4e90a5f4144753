//! Asynchronous front-end.
//!
//! # Data Flow
//! ```text
//! AsyncRead (socket, pipe, editor buffer)
//!     → reader.rs (read to end, decode UTF-8, normalise line endings)
//!     → Parser::parse
//!     → one Result<ParsedRequest, StreamError>
//! ```
//!
//! # Design Decisions
//! - Only acquisition is async; parsing itself never yields
//! - Exactly one completion per call: descriptor or error, never both

pub mod reader;

pub use reader::{normalize_line_endings, read_request, StreamError};
