//! Client identity extractor
//!
//! First `X-Forwarded-For` entry, then the socket peer address, then the
//! shared `"unknown"` identity.

use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use gallery_core::value_objects::ClientIdentity;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Identity used for likes and the comment spam guard
#[derive(Debug, Clone)]
pub struct ClientIp(pub ClientIdentity);

impl ClientIp {
    fn from_parts(parts: &Parts) -> Self {
        let forwarded = parts
            .headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok());
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        ClientIp(ClientIdentity::derive(forwarded, peer))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use axum::http::Request;

    use super::*;

    fn parts(forwarded: Option<&str>, peer: Option<SocketAddr>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = forwarded {
            builder = builder.header(FORWARDED_FOR, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        if let Some(addr) = peer {
            parts.extensions.insert(ConnectInfo(addr));
        }
        parts
    }

    #[test]
    fn test_forwarded_header_wins() {
        let peer = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9000);
        let ClientIp(identity) = ClientIp::from_parts(&parts(Some("203.0.113.7, 10.0.0.1"), Some(peer)));
        assert_eq!(identity.as_str(), "203.0.113.7");
    }

    #[test]
    fn test_peer_address_fallback() {
        let peer = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)), 9000);
        let ClientIp(identity) = ClientIp::from_parts(&parts(None, Some(peer)));
        assert_eq!(identity.as_str(), "10.1.2.3");
    }

    #[test]
    fn test_unknown_without_any_source() {
        let ClientIp(identity) = ClientIp::from_parts(&parts(None, None));
        assert!(identity.is_unknown());
    }
}
