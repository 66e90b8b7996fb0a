//! Proxy data models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocols a candidate is tried as, in trial order.
///
/// SOCKS5 goes first because some endpoints accept more than one framing and
/// the most capable protocol is the one worth recording.
pub const TRIAL_ORDER: [ProxyType; 3] = [ProxyType::Socks5, ProxyType::Socks4, ProxyType::Http];

/// Proxy protocol category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    Socks5,
    Socks4,
    Http,
}

impl ProxyType {
    /// Category name used for output files
    pub fn name(&self) -> &'static str {
        match self {
            ProxyType::Socks5 => "socks5",
            ProxyType::Socks4 => "socks4",
            ProxyType::Http => "http",
        }
    }

    /// URL scheme handed to the HTTP client. Both SOCKS variants resolve
    /// the destination on the proxy side.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyType::Socks5 => "socks5h",
            ProxyType::Socks4 => "socks4a",
            ProxyType::Http => "http",
        }
    }

    /// Name of the category file verified candidates are appended to
    pub fn file_name(&self) -> String {
        format!("{}_proxies.txt", self.name())
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A candidate endpoint as read from the input, usually `host:port`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the attempt for one protocol
    pub fn attempt(&self, proxy_type: ProxyType) -> ProtocolAttempt {
        ProtocolAttempt {
            proxy_type,
            url: format!("{}://{}", proxy_type.scheme(), self.0),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One protocol assumption applied to a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolAttempt {
    pub proxy_type: ProxyType,
    pub url: String,
}

/// A candidate confirmed to work under one protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedResult {
    pub candidate: Candidate,
    pub proxy_type: ProxyType,
}

impl VerifiedResult {
    pub fn new(candidate: Candidate, proxy_type: ProxyType) -> Self {
        Self {
            candidate,
            proxy_type,
        }
    }
}

/// What a single probe ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// First protocol in trial order that answered
    Success(ProxyType),
    /// Every protocol failed; the reasons are not kept
    Failure,
    /// Stopped at a checkpoint because the run was interrupted
    Cancelled,
}
