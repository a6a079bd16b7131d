//! Per-client rate limiting for protected paths.
//!
//! Requests outside the protected prefixes pass straight through without
//! touching the limiter. Clients are keyed by peer IP (or the first
//! `X-Forwarded-For` hop when `rate_limit.trust_forwarded_for` is set).

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use folio_core::{Decision, UNKNOWN_CLIENT};

use crate::state::AppState;

pub async fn rate_limit(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let settings = &state.config.rate_limit;
    if !settings.enabled || !state.protected.matches(req.uri().path()) {
        return next.run(req).await;
    }

    let client = client_id(&req, settings.trust_forwarded_for);
    match state.limiter.check(&client, state.clock.now_ms()) {
        Decision::Allowed { .. } => next.run(req).await,
        Decision::Denied { retry_after_secs } => {
            tracing::warn!(
                client = %client,
                path = %req.uri().path(),
                retry_after_secs,
                "Rejected admin request over rate limit"
            );
            too_many_requests(retry_after_secs)
        }
    }
}

fn client_id(req: &Request<Body>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn too_many_requests(retry_after_secs: u64) -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [
            (header::RETRY_AFTER, retry_after_secs.to_string()),
            (header::CONTENT_TYPE, "text/plain".to_string()),
        ],
        format!("Too Many Requests. Please try again in {retry_after_secs} seconds."),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> axum::http::request::Builder {
        Request::builder().uri("/admin")
    }

    #[test]
    fn uses_peer_ip() {
        let mut req = request().body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 2], 50000))));
        assert_eq!(client_id(&req, false), "127.0.0.2");
    }

    #[test]
    fn falls_back_to_unknown() {
        let req = request().body(Body::empty()).unwrap();
        assert_eq!(client_id(&req, false), "unknown");
    }

    #[test]
    fn ignores_forwarded_for_unless_trusted() {
        let mut req = request()
            .header("x-forwarded-for", "203.0.113.9")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 1))));
        assert_eq!(client_id(&req, false), "10.0.0.1");
        assert_eq!(client_id(&req, true), "203.0.113.9");
    }

    #[test]
    fn takes_first_forwarded_hop() {
        let req = request()
            .header("x-forwarded-for", " 203.0.113.9 , 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_id(&req, true), "203.0.113.9");
    }

    #[test]
    fn empty_forwarded_for_falls_back() {
        let req = request()
            .header("x-forwarded-for", "")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_id(&req, true), "unknown");
    }

    #[tokio::test]
    async fn rejection_response_shape() {
        let response = too_many_requests(42);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(
            &body[..],
            b"Too Many Requests. Please try again in 42 seconds."
        );
    }
}
