//! Request target decomposition.
//!
//! # Responsibilities
//! - Decide whether a target is an absolute URL or a bare path
//! - Split absolute URLs into protocol, userinfo, host, hostname, port, path
//!
//! # Design Decisions
//! - Pure string work: no DNS, no percent-decoding, no canonicalization
//!   beyond lower-casing the scheme
//! - An explicit port is reported exactly as written, default or not
//! - Anything without a `scheme://` prefix is a path and kept verbatim

use serde::Serialize;

use crate::request::error::TargetError;

/// The pieces of a request target.
///
/// For a bare path every field except `path` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UrlParts {
    /// Scheme with trailing colon, e.g. `"https:"`.
    pub protocol: Option<String>,
    /// Userinfo as written, e.g. `"user:pass"`.
    pub auth: Option<String>,
    /// `hostname[:port]`.
    pub host: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<String>,
    /// Path plus query string, never empty.
    pub path: String,
}

impl UrlParts {
    /// Parts for a target with no scheme or authority.
    pub fn path_only(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Returns true if the target carried a scheme and authority.
    pub fn is_absolute(&self) -> bool {
        self.protocol.is_some()
    }
}

/// Decompose a request target into its URL parts.
pub fn decompose_target(target: &str) -> Result<UrlParts, TargetError> {
    let Some((scheme, rest)) = split_scheme(target) else {
        return Ok(UrlParts::path_only(target));
    };

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    // Userinfo may itself contain '@' when not percent-encoded; the last one
    // separates it from the host.
    let (auth, host) = match authority.rsplit_once('@') {
        Some((userinfo, host)) => ((!userinfo.is_empty()).then(|| userinfo.to_owned()), host),
        None => (None, authority),
    };

    let (hostname, port, bracketed) = split_host_port(target, host)?;
    let host = match &port {
        Some(port) => format!("{bracketed}:{port}"),
        None => bracketed,
    };

    let path = match tail.find('#') {
        Some(pos) => &tail[..pos],
        None => tail,
    };
    let path = if path.is_empty() {
        "/".to_owned()
    } else if path.starts_with('?') {
        format!("/{path}")
    } else {
        path.to_owned()
    };

    Ok(UrlParts {
        protocol: Some(format!("{scheme}:")),
        auth,
        host: Some(host),
        hostname: Some(hostname),
        port,
        path,
    })
}

/// Split `scheme://rest`, returning the lower-cased scheme.
fn split_scheme(target: &str) -> Option<(String, &str)> {
    let (scheme, rest) = target.split_once("://")?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    let valid = first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then(|| (scheme.to_ascii_lowercase(), rest))
}

/// Returns `(hostname, port, host-as-written-without-port)`.
fn split_host_port(
    url: &str,
    host: &str,
) -> Result<(String, Option<String>, String), TargetError> {
    let (hostname, bracketed, port) = if let Some(inner) = host.strip_prefix('[') {
        let close = inner
            .find(']')
            .ok_or_else(|| TargetError::UnclosedIpv6Literal(url.to_owned()))?;
        let after = &inner[close + 1..];
        let port = match after.strip_prefix(':') {
            Some(port) => port,
            None if after.is_empty() => "",
            None => {
                return Err(TargetError::InvalidPort {
                    url: url.to_owned(),
                    port: after.to_owned(),
                })
            }
        };
        (&inner[..close], &host[..close + 2], port)
    } else {
        match host.rsplit_once(':') {
            Some((hostname, port)) => (hostname, hostname, port),
            None => (host, host, ""),
        }
    };

    if hostname.is_empty() {
        return Err(TargetError::EmptyHost(url.to_owned()));
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TargetError::InvalidPort {
            url: url.to_owned(),
            port: port.to_owned(),
        });
    }

    let port = (!port.is_empty()).then(|| port.to_owned());
    Ok((hostname.to_owned(), port, bracketed.to_owned()))
}
