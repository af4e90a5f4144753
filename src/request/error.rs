//! Parse error definitions.
//!
//! # Design Decisions
//! - One top-level kind per failure class; the detail lives in a nested reason
//! - Line numbers are 1-based and point at the offending source line
//! - Errors are plain data (`Clone + PartialEq`) so callers can match on them

use thiserror::Error;

/// Errors that abort a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input held nothing but whitespace.
    #[error("Empty input: no request line found")]
    EmptyInput,

    /// The request line could not be tokenized into method / target / version.
    #[error("Malformed request line {line}: {reason}")]
    MalformedRequestLine {
        line: usize,
        #[source]
        reason: RequestLineError,
    },

    /// A directive name or value could not be parsed.
    #[error("Malformed directive `{name}` on line {line}: {reason}")]
    MalformedDirective {
        line: usize,
        name: String,
        #[source]
        reason: DirectiveError,
    },

    /// A header-section line that is not a comment, directive, header or blank.
    #[error("Unrecognized header line {line}: {content:?}")]
    UnrecognizedHeaderLine { line: usize, content: String },
}

impl ParseError {
    /// Source line the error was detected on, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::EmptyInput => None,
            ParseError::MalformedRequestLine { line, .. }
            | ParseError::MalformedDirective { line, .. }
            | ParseError::UnrecognizedHeaderLine { line, .. } => Some(*line),
        }
    }
}

/// Why a request line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestLineError {
    #[error("missing request target")]
    MissingTarget,

    #[error("expected at most 3 tokens, found {0}")]
    TooManyTokens(usize),

    #[error("expected HTTP version, found `{0}`")]
    UnexpectedToken(String),

    #[error(transparent)]
    Target(#[from] TargetError),
}

/// Why an absolute URL target could not be decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("URL `{0}` has an empty host")]
    EmptyHost(String),

    #[error("URL `{url}` has a non-numeric port `{port}`")]
    InvalidPort { url: String, port: String },

    #[error("URL `{0}` has an unterminated IPv6 literal")]
    UnclosedIpv6Literal(String),
}

/// Why a directive line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("directive name must be non-empty and contain no whitespace")]
    InvalidName,

    #[error("unbalanced array brackets")]
    UnbalancedBrackets,

    #[error("unterminated quoted string")]
    UnterminatedQuote,

    #[error("empty array element")]
    EmptyArrayElement,
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
