//! Read a request description from an async byte stream.

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::request::{ParseError, ParsedRequest, Parser};

/// Errors from reading and parsing a streamed request.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Read `reader` to the end and parse it.
pub async fn read_request<R>(parser: &Parser, mut reader: R) -> Result<ParsedRequest, StreamError>
where
    R: AsyncRead + Unpin,
{
    let mut raw = Vec::new();
    let read = reader.read_to_end(&mut raw).await?;
    tracing::trace!(bytes = read, "Request text read");

    let text = String::from_utf8(raw)?;
    Ok(parser.parse(&normalize_line_endings(&text))?)
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            chars.next_if_eq(&'\n');
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}
