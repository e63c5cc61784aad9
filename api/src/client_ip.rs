//! Client IP resolution for the spam guard.
//!
//! The service runs behind a reverse proxy in production, so the forwarded
//! headers take precedence over the socket peer address. The resolved value
//! is stored with the submission and keys the rate-limit window.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

/// Resolve the requester address: `x-forwarded-for` (first parseable entry),
/// then `x-real-ip`, then the socket peer, then `"unknown"`.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(parse_x_forwarded_for)
    {
        return ip.to_string();
    }

    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .and_then(parse_ip_addr)
    {
        return ip.to_string();
    }

    if let Some(peer) = peer {
        return peer.ip().to_string();
    }

    "unknown".to_string()
}

fn parse_x_forwarded_for(raw: &str) -> Option<IpAddr> {
    raw.split(',').map(str::trim).find_map(parse_ip_addr)
}

fn parse_ip_addr(raw: &str) -> Option<IpAddr> {
    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}
