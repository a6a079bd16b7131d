//! Router assembly and the listener loop.
//!
//! Middleware order, outermost first: trace, CORS, body limit, security
//! headers, rate limit, admin auth, then the routes and the static site.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use folio_core::{Clock, Sweeper, SystemClock};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ServerConfig;
use crate::middleware;
use crate::state::AppState;
use crate::static_files;

pub fn build_router(state: AppState) -> Router {
    // CORS: same-origin only by default (no cross-origin requests allowed)
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let base_router = Router::new()
        .merge(api::public_router())
        .merge(api::admin_router())
        .fallback_service(static_files::site_service(&state.config.site.root))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::admin_auth::admin_auth,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ));

    let with_headers = if state.config.tls.is_enabled() {
        base_router.layer(from_fn(middleware::security_headers::security_headers_with_hsts))
    } else {
        base_router.layer(from_fn(middleware::security_headers::security_headers))
    };

    with_headers
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until Ctrl+C, sweeping expired rate-limit windows in the background.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState::new(config, clock.clone())?;
    let sweeper = Sweeper::spawn(state.limiter.clone(), clock);

    let config = state.config.clone();
    let bind_addr = config.bind_addr;
    tracing::info!(
        admin_auth = state.admin.is_enabled(),
        rate_limit = config.rate_limit.enabled,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        site_root = %config.site.root.display(),
        "Configuration loaded"
    );

    let app = build_router(state).into_make_service_with_connect_info::<SocketAddr>();

    if let (Some(cert), Some(key)) = (&config.tls.cert_path, &config.tls.key_path) {
        use axum_server::tls_rustls::RustlsConfig;
        let rustls_config = RustlsConfig::from_pem_file(cert, key).await?;
        let handle = axum_server::Handle::new();
        let shutdown = handle.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown.graceful_shutdown(Some(Duration::from_secs(10)));
        });
        tracing::info!("folio-web listening on https://{}", bind_addr);
        axum_server::bind_rustls(bind_addr, rustls_config)
            .handle(handle)
            .serve(app)
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        tracing::info!("folio-web listening on http://{}", bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    }

    sweeper.shutdown().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
