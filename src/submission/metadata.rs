use std::net::IpAddr;

use axum::http::HeaderMap;

/// Resolve the client address recorded with a submission.
///
/// `X-Forwarded-For` is taken verbatim when present, so this is only as
/// trustworthy as the proxy in front of the service. Otherwise the peer
/// address is used, or an empty string when neither is known.
pub fn client_ip(headers: &HeaderMap, peer_addr: Option<IpAddr>) -> String {
    if let Some(xff) = headers.get("x-forwarded-for") {
        return String::from_utf8_lossy(xff.as_bytes()).into_owned();
    }

    peer_addr.map(|ip| ip.to_string()).unwrap_or_default()
}
