//! Operator view of individual rate-limit windows.

use axum::extract::{Path, State};
use axum::Json;
use folio_core::RateLimitStore;

use crate::dto::{ClientWindowResponse, ResetResponse};
use crate::error::AppError;
use crate::state::AppState;

pub async fn client_window(
    State(state): State<AppState>,
    Path(client): Path<String>,
) -> Result<Json<ClientWindowResponse>, AppError> {
    let entry = state
        .limiter
        .store()
        .get(&client)
        .filter(|e| !e.is_expired(state.clock.now_ms()))
        .ok_or_else(|| AppError::NotFound(format!("No rate limit window for {client}")))?;

    let max = state.limiter.policy().max_requests();
    Ok(Json(ClientWindowResponse {
        count: entry.count,
        reset_at_ms: entry.reset_at_ms,
        remaining: max.saturating_sub(entry.count),
        client,
    }))
}

/// Clears a client's window so its next request opens a fresh one.
///
/// A window that has already closed counts as absent, matching
/// [`client_window`].
pub async fn reset_client(
    State(state): State<AppState>,
    Path(client): Path<String>,
) -> Result<Json<ResetResponse>, AppError> {
    let now_ms = state.clock.now_ms();
    match state.limiter.store().delete(&client) {
        Some(entry) if !entry.is_expired(now_ms) => {
            tracing::info!(client = %client, "Rate limit window reset by admin");
            Ok(Json(ResetResponse {
                success: true,
                client,
            }))
        }
        _ => Err(AppError::NotFound(format!(
            "No rate limit window for {client}"
        ))),
    }
}
