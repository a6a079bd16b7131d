use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

const CHALLENGE: &str = "Basic realm=\"Admin Area\"";

/// HTTP Basic gate in front of the protected paths.
///
/// If no admin password is configured, skip auth (dev mode).
pub async fn admin_auth(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    if !state.protected.matches(req.uri().path()) {
        return next.run(req).await;
    }

    // A header that is not visible ASCII counts as missing.
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if state.admin.authorize(authorization) {
        next.run(req).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, CHALLENGE)],
        )
            .into_response()
    }
}
