use axum::extract::State;
use axum::Json;

use crate::dto::{DashboardResponse, RateLimitSummary};
use crate::state::AppState;

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let policy = state.limiter.policy();
    Json(DashboardResponse {
        auth_enabled: state.admin.is_enabled(),
        tracked_clients: state.limiter.tracked_clients(),
        rate_limit: RateLimitSummary {
            enabled: state.config.rate_limit.enabled,
            window_secs: policy.window().as_secs(),
            max_requests: policy.max_requests(),
            protected_prefixes: state.protected.prefixes().to_vec(),
        },
    })
}
