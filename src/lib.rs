//! Plain-text HTTP request parser.
//!
//! Turns a human-authored request description (request line, headers,
//! `@` directives and an optional body) into a typed [`RequestDescriptor`]
//! plus a body string, ready to hand to an HTTP client.
//!
//! ```text
//! GET https://api.example.com/cats?limit=10
//! Accept: application/json
//! # comments are ignored
//! @followRedirects: true
//! @redirectStatusCodes: [301, 302]
//!
//! {"body": "anything after the first blank line"}
//! ```

pub mod config;
pub mod observability;
pub mod request;
pub mod stream;

pub use config::ParserConfig;
pub use request::{
    DirectiveValue, Directives, Headers, ParseError, ParseResult, ParsedRequest, Parser,
    RequestDescriptor,
};
