use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};

/// Logs the client address and user agent of each request.
pub async fn log_client(request: Request, next: Next) -> Response {
    let client_ip = client_ip(&request);
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        // arch-lint: allow(no-silent-result-drop) reason="a non-ASCII User-Agent is logged as empty"
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    tracing::info!(%client_ip, %user_agent, path = %request.uri().path(), "incoming request");
    next.run(request).await
}

/// First `X-Forwarded-For` entry when behind a proxy, else the peer
/// address, else `"unknown"`.
pub fn client_ip(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        // arch-lint: allow(no-silent-result-drop) reason="a non-ASCII X-Forwarded-For is ignored in favor of the peer address"
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}
