//! Client identity - the network address used as a stand-in for "user"
//!
//! Likes and the comment spam guard key on this value. It is derived from the
//! first entry of `X-Forwarded-For`, falling back to the transport peer
//! address and finally to the literal `unknown`. Every client that ends up as
//! `unknown` shares one bucket.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Client identity string (an IP address or `unknown`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    /// Identity used when neither the header nor the peer address is usable
    pub const UNKNOWN: &'static str = "unknown";

    /// Wrap an already derived identity string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The shared fallback identity
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Derive the identity from an `X-Forwarded-For` value and the peer address
    pub fn derive(forwarded_for: Option<&str>, peer: Option<IpAddr>) -> Self {
        let forwarded = forwarded_for
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|first| !first.is_empty());

        match (forwarded, peer) {
            (Some(first), _) => Self(first.to_string()),
            (None, Some(ip)) => Self(ip.to_string()),
            (None, None) => Self::unknown(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
