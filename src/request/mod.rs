//! Request parsing subsystem.
//!
//! # Data Flow
//! ```text
//! raw text
//!     → parser.rs (split into lines, drive the state machine)
//!     → line.rs (classify: blank / comment / directive / header)
//!     → request line → method.rs (method or target?) → target.rs (decompose target)
//!     → directive    → value.rs (coerce to bool / number / string / array)
//!     → header       → headers.rs (ordered, case-preserving)
//!     → descriptor.rs (RequestDescriptor + body)
//! ```
//!
//! # Design Decisions
//! - Single synchronous pass, no I/O, no shared mutable state
//! - Fail fast: the first error aborts the parse
//! - No regex: every grammar rule is a hand-written scanner
//! - Deterministic: same input always yields the same descriptor

pub mod descriptor;
pub mod error;
pub mod headers;
pub mod line;
pub mod method;
pub mod parser;
pub mod target;
pub mod value;

pub use descriptor::{Directives, ParsedRequest, RequestDescriptor};
pub use error::{ParseError, ParseResult};
pub use headers::Headers;
pub use method::MethodTable;
pub use parser::{ParseState, Parser};
pub use target::UrlParts;
pub use value::DirectiveValue;
