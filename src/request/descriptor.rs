//! Parsed request descriptor.
//!
//! # Responsibilities
//! - Hold the typed result of one parse: method, target parts, headers,
//!   directives
//! - Offer typed directive lookups for the common value kinds
//! - Rebuild a `url::Url` from the target parts for an HTTP client
//! - Render the flat "options" view where directives sit beside the core
//!   fields
//!
//! # Design Decisions
//! - Fields are private; a descriptor is read-only once the parser returns it
//! - Headers and directives are separate namespaces
//! - In the options view core fields always win over same-named directives

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use url::Url;

use crate::request::headers::Headers;
use crate::request::target::UrlParts;
use crate::request::value::DirectiveValue;

/// Directive name to typed value. A name appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives {
    entries: BTreeMap<String, DirectiveValue>,
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a directive, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: DirectiveValue) -> Option<DirectiveValue> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&DirectiveValue> {
        self.entries.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(DirectiveValue::as_bool)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(DirectiveValue::as_number)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(DirectiveValue::as_integer)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(DirectiveValue::as_str)
    }

    pub fn get_array(&self, name: &str) -> Option<&[DirectiveValue]> {
        self.get(name).and_then(DirectiveValue::as_array)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate directives in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Directives {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// The structured result of parsing one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    method: String,
    #[serde(flatten)]
    target: UrlParts,
    headers: Headers,
    directives: Directives,
}

impl RequestDescriptor {
    pub(crate) fn new(
        method: String,
        target: UrlParts,
        headers: Headers,
        directives: Directives,
    ) -> Self {
        Self {
            method,
            target,
            headers,
            directives,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Scheme with trailing colon, `None` for path-only targets.
    pub fn protocol(&self) -> Option<&str> {
        self.target.protocol.as_deref()
    }

    pub fn auth(&self) -> Option<&str> {
        self.target.auth.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.target.host.as_deref()
    }

    pub fn hostname(&self) -> Option<&str> {
        self.target.hostname.as_deref()
    }

    pub fn port(&self) -> Option<&str> {
        self.target.port.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.target.path
    }

    pub fn target(&self) -> &UrlParts {
        &self.target
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveValue> {
        self.directives.get(name)
    }

    /// Rebuild the absolute URL from protocol, auth, host and path.
    ///
    /// Returns `Ok(None)` for path-only targets.
    pub fn url(&self) -> Result<Option<Url>, url::ParseError> {
        let (Some(protocol), Some(host)) = (self.protocol(), self.host()) else {
            return Ok(None);
        };
        let userinfo = self.auth().map(|a| format!("{a}@")).unwrap_or_default();
        Url::parse(&format!("{protocol}//{userinfo}{host}{}", self.path())).map(Some)
    }

    /// Absolute URL for this request, joining path-only targets onto `base`.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        match self.url()? {
            Some(url) => Ok(url),
            None => base.join(self.path()),
        }
    }

    /// Flat options object: core fields, `headers`, and every directive as a
    /// top-level field.
    pub fn to_options(&self) -> Map<String, Value> {
        let mut options = Map::new();
        options.insert("method".into(), Value::from(self.method.as_str()));
        options.insert("protocol".into(), Value::from(self.protocol()));
        options.insert("auth".into(), Value::from(self.auth()));
        options.insert("host".into(), Value::from(self.host()));
        options.insert("hostname".into(), Value::from(self.hostname()));
        options.insert("port".into(), Value::from(self.port()));
        options.insert("path".into(), Value::from(self.path()));
        options.insert(
            "headers".into(),
            self.headers
                .iter()
                .map(|(name, value)| (name.to_owned(), Value::from(value)))
                .collect::<Map<_, _>>()
                .into(),
        );

        for (name, value) in self.directives.iter() {
            if options.contains_key(name) {
                tracing::warn!(directive = name, "Directive shadowed by a core field in options view");
                continue;
            }
            options.insert(name.to_owned(), value.to_json());
        }

        options
    }
}

/// A descriptor together with the raw body text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub descriptor: RequestDescriptor,
    pub body: String,
}

impl ParsedRequest {
    pub fn into_parts(self) -> (RequestDescriptor, String) {
        (self.descriptor, self.body)
    }
}
