//! Request parser state machine.
//!
//! # States
//! ```text
//! Skipping ──non-blank──▶ RequestLine ──▶ HeaderSection ──blank──▶ Body
//!    │ blank                                 │ comment / directive / header
//!    └──▶ Skipping                           └──▶ HeaderSection
//! ```
//!
//! # Design Decisions
//! - `Parser` holds only immutable configuration; every call to `parse`
//!   builds its own run state, so one parser can serve any number of callers
//! - The request line is handled in a single step, so `RequestLine` is only
//!   ever observed while that line is being consumed
//! - Body lines are re-joined with `\n` exactly as they appeared

use crate::config::loader::ConfigError;
use crate::config::schema::ParserConfig;
use crate::config::validation::validate_config;
use crate::request::descriptor::{Directives, ParsedRequest, RequestDescriptor};
use crate::request::error::{DirectiveError, ParseError, ParseResult, RequestLineError};
use crate::request::headers::Headers;
use crate::request::line::{classify_line, Line};
use crate::request::method::MethodTable;
use crate::request::target::{decompose_target, UrlParts};
use crate::request::value::coerce_value;

/// Parser phase while consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Discarding blank lines before the request line.
    Skipping,
    /// Consuming the request line.
    RequestLine,
    /// Reading headers, directives and comments.
    HeaderSection,
    /// Everything from here on is body text.
    Body,
}

/// Parses plain-text request descriptions.
#[derive(Debug, Clone)]
pub struct Parser {
    methods: MethodTable,
    default_method: String,
    strict: bool,
}

impl Parser {
    /// Create a parser with the default configuration.
    pub fn new() -> Self {
        Self::from_validated(ParserConfig::default())
    }

    /// Create a parser from a configuration, validating it first.
    pub fn with_config(config: ParserConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: ParserConfig) -> Self {
        Self {
            methods: config.method_table(),
            default_method: config.default_method,
            strict: config.strict,
        }
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn default_method(&self) -> &str {
        &self.default_method
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parse a `\n`-separated request description.
    pub fn parse(&self, text: &str) -> ParseResult<ParsedRequest> {
        let mut run = ParseRun::new(self);
        for (index, line) in text.split('\n').enumerate() {
            run.feed(index + 1, line)?;
        }
        run.finish()
    }

    /// Parse and hand the single outcome to `on_complete`.
    pub fn parse_with<F, T>(&self, text: &str, on_complete: F) -> T
    where
        F: FnOnce(ParseResult<ParsedRequest>) -> T,
    {
        on_complete(self.parse(text))
    }

    /// Split a request line into method and decomposed target.
    fn parse_request_line(&self, line: usize, text: &str) -> ParseResult<(String, UrlParts)> {
        let malformed = |reason: RequestLineError| ParseError::MalformedRequestLine { line, reason };

        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() > 3 {
            return Err(malformed(RequestLineError::TooManyTokens(tokens.len())));
        }

        let (method, rest) = match tokens.split_first() {
            Some((first, rest)) if self.methods.contains(first) => ((*first).to_owned(), rest),
            _ => (self.default_method.clone(), tokens.as_slice()),
        };

        let target = match rest {
            [] => return Err(malformed(RequestLineError::MissingTarget)),
            [target] => target,
            [target, version] if version.starts_with("HTTP/") => {
                tracing::trace!(line, version, "HTTP version ignored");
                target
            }
            // Without a method a third token can only be the one after a version.
            [_, unexpected] | [_, unexpected, _] if !unexpected.starts_with("HTTP/") => {
                return Err(malformed(RequestLineError::UnexpectedToken(
                    (*unexpected).to_owned(),
                )))
            }
            [.., extra] => {
                return Err(malformed(RequestLineError::UnexpectedToken(
                    (*extra).to_owned(),
                )))
            }
        };

        let parts = decompose_target(target).map_err(|e| malformed(e.into()))?;
        Ok((method, parts))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state of a single parse.
struct ParseRun<'p, 't> {
    parser: &'p Parser,
    state: ParseState,
    request: Option<(String, UrlParts)>,
    headers: Headers,
    directives: Directives,
    body: Vec<&'t str>,
}

impl<'p, 't> ParseRun<'p, 't> {
    fn new(parser: &'p Parser) -> Self {
        Self {
            parser,
            state: ParseState::Skipping,
            request: None,
            headers: Headers::new(),
            directives: Directives::new(),
            body: Vec::new(),
        }
    }

    fn feed(&mut self, number: usize, line: &'t str) -> ParseResult<()> {
        match classify_line(line, self.state) {
            Line::Blank => {
                if self.state == ParseState::HeaderSection {
                    tracing::trace!(line = number, "Header section ended");
                    self.state = ParseState::Body;
                }
            }
            Line::RequestLine(text) => {
                self.state = ParseState::RequestLine;
                let (method, target) = self.parser.parse_request_line(number, text)?;
                tracing::debug!(
                    line = number,
                    method = %method,
                    path = %target.path,
                    absolute = target.is_absolute(),
                    "Request line parsed"
                );
                self.request = Some((method, target));
                self.state = ParseState::HeaderSection;
            }
            Line::Comment => {}
            Line::Directive { name, value } => self.directive(number, name, value)?,
            Line::Header { name, value } => {
                if let Some(previous) = self.headers.insert(name, value) {
                    tracing::debug!(line = number, header = name, previous = %previous, "Duplicate header overwritten");
                }
            }
            Line::Body(text) => self.body.push(text),
            Line::Unrecognized(text) => {
                if self.parser.strict {
                    return Err(ParseError::UnrecognizedHeaderLine {
                        line: number,
                        content: text.to_owned(),
                    });
                }
                tracing::warn!(line = number, content = text, "Skipping unrecognized header line");
            }
        }
        Ok(())
    }

    fn directive(&mut self, number: usize, name: &str, value: Option<&str>) -> ParseResult<()> {
        let malformed = |reason: DirectiveError| ParseError::MalformedDirective {
            line: number,
            name: name.to_owned(),
            reason,
        };

        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(malformed(DirectiveError::InvalidName));
        }

        let value = coerce_value(value.unwrap_or_default()).map_err(malformed)?;
        if self.directives.insert(name, value).is_some() {
            tracing::debug!(line = number, directive = name, "Duplicate directive, last value wins");
        }
        Ok(())
    }

    fn finish(self) -> ParseResult<ParsedRequest> {
        let Some((method, target)) = self.request else {
            return Err(ParseError::EmptyInput);
        };

        let body = self.body.join("\n");
        tracing::debug!(
            headers = self.headers.len(),
            directives = self.directives.len(),
            body_len = body.len(),
            "Request parsed"
        );

        Ok(ParsedRequest {
            descriptor: RequestDescriptor::new(method, target, self.headers, self.directives),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::value::DirectiveValue;

    fn parse(text: &str) -> ParsedRequest {
        Parser::new().parse(text).expect("parse failed")
    }

    #[test]
    fn test_target_only_defaults_to_get() {
        let parsed = parse("http://localhost/dogs");
        let d = &parsed.descriptor;
        assert_eq!(d.method(), "GET");
        assert_eq!(d.protocol(), Some("http:"));
        assert_eq!(d.host(), Some("localhost"));
        assert_eq!(d.path(), "/dogs");
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_method_and_path() {
        let d = parse("POST /cats").descriptor;
        assert_eq!(d.method(), "POST");
        assert_eq!(d.protocol(), None);
        assert_eq!(d.auth(), None);
        assert_eq!(d.host(), None);
        assert_eq!(d.hostname(), None);
        assert_eq!(d.port(), None);
        assert_eq!(d.path(), "/cats");
    }

    #[test]
    fn test_version_is_discarded() {
        let d = parse("OPTIONS /guinea-pigs HTTP/1.1").descriptor;
        assert_eq!(d.method(), "OPTIONS");
        assert_eq!(d.path(), "/guinea-pigs");

        let d = parse("/guinea-pigs HTTP/2").descriptor;
        assert_eq!(d.method(), "GET");
        assert_eq!(d.path(), "/guinea-pigs");
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        assert_eq!(parse("\n   \n\t\nPUT /hamsters"), parse("PUT /hamsters"));
    }

    #[test]
    fn test_state_transitions() {
        let parser = Parser::new();
        let mut run = ParseRun::new(&parser);
        assert_eq!(run.state, ParseState::Skipping);
        run.feed(1, "").unwrap();
        assert_eq!(run.state, ParseState::Skipping);
        run.feed(2, "GET /").unwrap();
        assert_eq!(run.state, ParseState::HeaderSection);
        run.feed(3, "# comment").unwrap();
        assert_eq!(run.state, ParseState::HeaderSection);
        run.feed(4, "   ").unwrap();
        assert_eq!(run.state, ParseState::Body);
        run.feed(5, "").unwrap();
        assert_eq!(run.state, ParseState::Body);
    }

    #[test]
    fn test_body_is_verbatim() {
        let parsed = parse("POST /x\nA: b\n\nline one\n\n# not a comment\n@not-a-directive\n");
        assert_eq!(
            parsed.body,
            "line one\n\n# not a comment\n@not-a-directive\n"
        );
        assert!(parsed.descriptor.directives().is_empty());
    }

    #[test]
    fn test_whitespace_only_separator_starts_body() {
        let parsed = parse("POST /x\nA: b\n  \nbody");
        assert_eq!(parsed.body, "body");
    }

    #[test]
    fn test_duplicate_directive_last_wins() {
        let d = parse("GET /\n@limit: 1\n@limit: 2").descriptor;
        assert_eq!(d.directive("limit"), Some(&DirectiveValue::Number(2.0)));
    }

    #[test]
    fn test_header_and_directive_namespaces_are_separate() {
        let d = parse("GET /\ntimeout: 10s\n@timeout: 30").descriptor;
        assert_eq!(d.header("timeout"), Some("10s"));
        assert_eq!(d.directives().get_number("timeout"), Some(30.0));
    }

    #[test]
    fn test_empty_input() {
        let parser = Parser::new();
        assert_eq!(parser.parse(""), Err(ParseError::EmptyInput));
        assert_eq!(parser.parse("  \n\n \t"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_malformed_request_lines() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("\nDELETE"),
            Err(ParseError::MalformedRequestLine {
                line: 2,
                reason: RequestLineError::MissingTarget
            })
        );
        assert_eq!(
            parser.parse("GET /x HTTP/1.1 extra"),
            Err(ParseError::MalformedRequestLine {
                line: 1,
                reason: RequestLineError::TooManyTokens(4)
            })
        );
        assert_eq!(
            parser.parse("GET /x version"),
            Err(ParseError::MalformedRequestLine {
                line: 1,
                reason: RequestLineError::UnexpectedToken("version".into())
            })
        );
        assert_eq!(
            parser.parse("foo bar baz"),
            Err(ParseError::MalformedRequestLine {
                line: 1,
                reason: RequestLineError::UnexpectedToken("bar".into())
            })
        );
        assert_eq!(
            parser.parse("/x HTTP/1.1 extra"),
            Err(ParseError::MalformedRequestLine {
                line: 1,
                reason: RequestLineError::UnexpectedToken("extra".into())
            })
        );
        assert!(matches!(
            parser.parse("GET http://:80/"),
            Err(ParseError::MalformedRequestLine {
                reason: RequestLineError::Target(_),
                ..
            })
        ));
    }

    #[test]
    fn test_lowercase_method_is_a_target() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("get /x"),
            Err(ParseError::MalformedRequestLine {
                line: 1,
                reason: RequestLineError::UnexpectedToken("/x".into())
            })
        );
    }

    #[test]
    fn test_malformed_directive() {
        let parser = Parser::new();
        assert_eq!(
            parser.parse("GET /\n@codes: [301, 302"),
            Err(ParseError::MalformedDirective {
                line: 2,
                name: "codes".into(),
                reason: DirectiveError::UnbalancedBrackets
            })
        );
        assert_eq!(
            parser.parse("GET /\n@: 1"),
            Err(ParseError::MalformedDirective {
                line: 2,
                name: String::new(),
                reason: DirectiveError::InvalidName
            })
        );
        assert!(matches!(
            parser.parse("GET /\n@two words"),
            Err(ParseError::MalformedDirective {
                reason: DirectiveError::InvalidName,
                ..
            })
        ));
    }

    #[test]
    fn test_unrecognized_header_line() {
        assert_eq!(
            Parser::new().parse("GET /\nHost: a\nthis is not a header\n\nbody"),
            Err(ParseError::UnrecognizedHeaderLine {
                line: 3,
                content: "this is not a header".into()
            })
        );
    }

    #[test]
    fn test_lenient_mode_skips_unrecognized_lines() {
        let config = ParserConfig {
            strict: false,
            ..ParserConfig::default()
        };
        let parser = Parser::with_config(config).unwrap();
        let parsed = parser.parse("GET /\nHost: a\nthis is not a header\n\nbody").unwrap();
        assert_eq!(parsed.descriptor.header("Host"), Some("a"));
        assert_eq!(parsed.body, "body");
    }

    #[test]
    fn test_new_matches_default_config() {
        let from_default = Parser::with_config(ParserConfig::default()).unwrap();
        let parser = Parser::new();
        assert_eq!(parser.methods(), from_default.methods());
        assert_eq!(parser.default_method(), from_default.default_method());
        assert_eq!(parser.is_strict(), from_default.is_strict());
    }

    #[test]
    fn test_configured_methods() {
        let config = ParserConfig {
            default_method: "POST".into(),
            extra_methods: vec!["PROPFIND".into()],
            ..ParserConfig::default()
        };
        let parser = Parser::with_config(config).unwrap();
        assert_eq!(parser.parse("PROPFIND /dav").unwrap().descriptor.method(), "PROPFIND");
        assert_eq!(parser.parse("/dav").unwrap().descriptor.method(), "POST");
        assert_eq!(parser.default_method(), "POST");
        assert!(parser.is_strict());
    }

    #[test]
    fn test_parse_with_delivers_one_outcome() {
        let parser = Parser::new();
        let method = parser.parse_with("PATCH /x", |result| {
            result.map(|p| p.descriptor.method().to_owned())
        });
        assert_eq!(method.as_deref(), Ok("PATCH"));

        let failed = parser.parse_with("", |result| result.is_err());
        assert!(failed);
    }

    #[test]
    fn test_parser_is_reusable() {
        let parser = Parser::new();
        let first = parser.parse("GET /a\nX: 1").unwrap();
        let second = parser.parse("GET /b").unwrap();
        assert_eq!(first.descriptor.header("X"), Some("1"));
        assert_eq!(second.descriptor.header("X"), None);
        assert_eq!(second.descriptor.path(), "/b");
    }
}
