//! Line classification.
//!
//! # Responsibilities
//! - Categorise one source line given the current parser state
//! - Split directive and header lines into name and value
//!
//! # Design Decisions
//! - Classification is pure and borrows from the input line
//! - Once the body starts every line is body content, whatever it looks like
//! - Header names must be RFC 9110 tokens written directly before the colon

use crate::request::method::is_token;
use crate::request::parser::ParseState;

/// A classified source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace only.
    Blank,
    /// `# ...`
    Comment,
    /// `@name` or `@name: value`. The name is trimmed but not validated.
    Directive { name: &'a str, value: Option<&'a str> },
    /// `Name: value`, value trimmed.
    Header { name: &'a str, value: &'a str },
    /// The first non-blank line, trimmed.
    RequestLine(&'a str),
    /// Verbatim body content.
    Body(&'a str),
    /// A header-section line matching none of the above.
    Unrecognized(&'a str),
}

/// Classify `line` according to the state the parser is in.
pub fn classify_line(line: &str, state: ParseState) -> Line<'_> {
    match state {
        ParseState::Body => Line::Body(line),
        _ if line.trim().is_empty() => Line::Blank,
        ParseState::Skipping | ParseState::RequestLine => Line::RequestLine(line.trim()),
        ParseState::HeaderSection => classify_header_line(line),
    }
}

fn classify_header_line(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        return Line::Comment;
    }

    if let Some(rest) = trimmed.strip_prefix('@') {
        return match rest.split_once(':') {
            Some((name, value)) => Line::Directive {
                name: name.trim(),
                value: Some(value.trim()),
            },
            None => Line::Directive {
                name: rest.trim(),
                value: None,
            },
        };
    }

    match trimmed.split_once(':') {
        Some((name, value)) if is_token(name) => Line::Header {
            name,
            value: value.trim(),
        },
        _ => Line::Unrecognized(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_line(line: &str) -> Line<'_> {
        classify_line(line, ParseState::HeaderSection)
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(header_line(""), Line::Blank);
        assert_eq!(header_line(" \t "), Line::Blank);
        assert_eq!(classify_line("   ", ParseState::Skipping), Line::Blank);
    }

    #[test]
    fn test_comment() {
        assert_eq!(header_line("# This is a comment"), Line::Comment);
        assert_eq!(header_line("   #indented"), Line::Comment);
    }

    #[test]
    fn test_directives() {
        assert_eq!(
            header_line("@flag"),
            Line::Directive {
                name: "flag",
                value: None
            }
        );
        assert_eq!(
            header_line("@redirectLimit: 5"),
            Line::Directive {
                name: "redirectLimit",
                value: Some("5")
            }
        );
        assert_eq!(
            header_line("@url: http://example.com:8080"),
            Line::Directive {
                name: "url",
                value: Some("http://example.com:8080")
            }
        );
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            header_line("Content-type: application/json"),
            Line::Header {
                name: "Content-type",
                value: "application/json"
            }
        );
        assert_eq!(
            header_line("X-Empty:"),
            Line::Header {
                name: "X-Empty",
                value: ""
            }
        );
        assert_eq!(
            header_line("Referer: http://example.com/"),
            Line::Header {
                name: "Referer",
                value: "http://example.com/"
            }
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(header_line("no colon here"), Line::Unrecognized("no colon here"));
        assert_eq!(header_line("Bad Name: x"), Line::Unrecognized("Bad Name: x"));
        assert_eq!(header_line("Host : x"), Line::Unrecognized("Host : x"));
        assert_eq!(header_line(": x"), Line::Unrecognized(": x"));
    }

    #[test]
    fn test_state_dependent() {
        assert_eq!(
            classify_line("  GET /x  ", ParseState::Skipping),
            Line::RequestLine("GET /x")
        );
        assert_eq!(classify_line("# not a comment", ParseState::Body), Line::Body("# not a comment"));
        assert_eq!(classify_line("", ParseState::Body), Line::Body(""));
    }
}
