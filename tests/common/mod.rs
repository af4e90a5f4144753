//! Shared fixtures for integration tests.

use reqfile::{ParsedRequest, Parser};

/// The headers / directives / body fixture used across tests.
#[allow(dead_code)]
pub const FULL_REQUEST: &str = concat!(
    "POST http://mydomain.com/cats\n",
    "Host: localhost\n",
    "Cache-control: no-cache\n",
    "Content-type: application/json\n",
    "# This is a comment\n",
    "@flag\n",
    "@followRedirects: true\n",
    "@redirectStatusCodes: [301, 302]\n",
    "@redirectLimit: 5\n",
    "@stringOption: \"stringValue\"\n",
    "@unquotedStringOption: stringValue\n",
    "\n",
    "{\"name\": \"molly\"}\n",
);

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    reqfile::observability::logging::init("reqfile=trace");
}

/// Parse with a default parser, panicking on error.
#[allow(dead_code)]
pub fn parse(text: &str) -> ParsedRequest {
    init_tracing();
    Parser::new()
        .parse(text)
        .unwrap_or_else(|e| panic!("failed to parse {text:?}: {e}"))
}
