use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub auth_enabled: bool,
    pub tracked_clients: usize,
    pub rate_limit: RateLimitSummary,
}

#[derive(Debug, Serialize)]
pub struct RateLimitSummary {
    pub enabled: bool,
    pub window_secs: u64,
    pub max_requests: u32,
    pub protected_prefixes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ClientWindowResponse {
    pub client: String,
    pub count: u32,
    pub reset_at_ms: u64,
    pub remaining: u32,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub client: String,
}
