use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use crate::config::settings::CorsConfig;
use crate::config::types::ServiceConfig;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::server::handlers::{login_json, login_query, logout, protected};
use crate::service::SsoService;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub sso: Arc<SsoService>,
}

impl AppState {
    pub fn new(metrics: &Metrics, sso: Arc<SsoService>) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            sso,
        }
    }
}

/// All routes of the service with CORS applied.
pub async fn router(service_config: &ServiceConfig, sso: Arc<SsoService>) -> Result<Router> {
    let metrics = get_metrics().await;
    let state = AppState::new(metrics, sso);

    let login_path = service_config.login_path();
    info!("served path: {}", login_path);
    let mut router = Router::new().route(&login_path, get(login_query).post(login_json));

    if let Some(path) = &service_config.endpoints.protected_path {
        info!("served path: {}", path);
        router = router.route(path, get(protected));
    }
    if let Some(path) = &service_config.endpoints.logout_path {
        info!("served path: {}", path);
        router = router.route(path, post(logout));
    }

    let router = router
        .merge(state.metrics_state.router(&service_config.settings.metrics))
        .layer(cors_layer(service_config.settings.cors.as_ref())?)
        .with_state(state);
    Ok(router)
}

fn cors_layer(cors: Option<&CorsConfig>) -> Result<CorsLayer> {
    let origins = cors.map(|c| c.allowed_origins.as_slice()).unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{}'", o)))
        .collect::<Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// Bind and serve until Ctrl-C / SIGTERM.
pub async fn start(service_config: &ServiceConfig, sso: Arc<SsoService>) -> Result<()> {
    let app = router(service_config, sso).await?;

    let server = &service_config.settings.server;
    let bind_addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", bind_addr))?;
    info!("Server is running on http://{}", bind_addr);

    let metrics = get_metrics().await;
    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;
    metrics.up.set(0);

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
