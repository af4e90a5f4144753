//! Recognised HTTP method names.
//!
//! The request line has no fixed shape: `GET /x`, `/x` and
//! `https://host/x HTTP/1.1` are all valid. The method table is what decides
//! whether the first token is a method or already the target.

use std::collections::BTreeSet;

/// Methods defined by RFC 9110 plus PATCH (RFC 5789).
pub const STANDARD_METHODS: [&str; 9] = [
    "GET", "HEAD", "POST", "PUT", "DELETE", "CONNECT", "OPTIONS", "TRACE", "PATCH",
];

/// Set of method names the parser accepts in the request line.
///
/// Matching is case-sensitive, as methods are in HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTable {
    methods: BTreeSet<String>,
}

impl MethodTable {
    /// Table holding only the standard methods.
    pub fn standard() -> Self {
        Self::empty().with_methods(STANDARD_METHODS)
    }

    pub fn empty() -> Self {
        Self {
            methods: BTreeSet::new(),
        }
    }

    /// Add methods to the table.
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods.extend(methods.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.methods.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Returns true if `s` is a non-empty RFC 9110 token.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_tchar)
}

pub(crate) fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}
