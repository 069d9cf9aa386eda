//! Best-effort client IP extractor.
//!
//! Registration and login enrich records with the caller's IP. Behind a
//! reverse proxy the socket address is the proxy's, so `X-Forwarded-For`
//! (first hop) and `X-Real-Ip` are consulted before falling back to the
//! connection address. Extraction never fails: an unidentifiable caller
//! yields [`UNKNOWN_IP`], and downstream geolocation simply resolves nothing.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::state::AppState;

/// Placeholder recorded when no address could be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// Client IP address as a raw string.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let from_header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let ip = from_header("x-forwarded-for")
            .or_else(|| from_header("x-real-ip"))
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| UNKNOWN_IP.to_string());

        Ok(ClientIp(ip))
    }
}
