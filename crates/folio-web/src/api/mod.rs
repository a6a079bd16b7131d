mod dashboard;
pub mod rate_limit;

use axum::routing::get;
use axum::Json;
use axum::Router;

use crate::dto::HealthResponse;
use crate::state::AppState;

pub fn public_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Admin routes. Gating happens in the middleware stack, not here.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard::dashboard))
        .route("/admin/dashboard", get(dashboard::dashboard))
        .route(
            "/admin/rate-limit/{client}",
            get(rate_limit::client_window).delete(rate_limit::reset_client),
        )
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
