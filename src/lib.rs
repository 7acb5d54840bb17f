//! Account registration service: a sign-up controller decorated with error
//! logging, backed by Argon2 hashing and a document store.

#![forbid(unsafe_code)]

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod server;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Router, middleware as AxumMiddleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};

use crate::infra::db::{DEFAULT_POOL_SIZE, Database};
use crate::presentation::protocols::Controller;
use crate::server::middlewares;

/// MUST NEVER be used in production.
#[cfg(test)]
pub async fn make_request(
    app: Router,
    method: axum::http::Method,
    path: &str,
    body: String,
) -> axum::http::Response<axum::body::Body> {
    use axum::extract::Request;
    use tower::util::ServiceExt;

    app.oneshot(
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// State sharing between routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Configuration>,
    pub signup: Arc<dyn Controller>,
    pub metrics: Option<PrometheusHandle>,
}

/// Prometheus exposition, when a recorder is installed.
async fn render_metrics(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Create router.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        // Hide sensitive headers before the trace span records them.
        .layer(SetSensitiveHeadersLayer::new([header::AUTHORIZATION, header::COOKIE]))
        // Add high level tracing/logging to all requests.
        .layer(
            TraceLayer::new_for_http()
                .on_body_chunk(|chunk: &Bytes, latency: Duration, _span: &tracing::Span| {
                    tracing::trace!(size_bytes = chunk.len(), latency = ?latency, "sending body chunk")
                })
                .make_span_with(DefaultMakeSpan::new().include_headers(true).level(tracing::Level::INFO))
                .on_request(DefaultOnRequest::new())
                .on_response(DefaultOnResponse::new().include_headers(true).latency_unit(LatencyUnit::Micros)),
        )
        // Set a timeout.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeouts.request(),
        ))
        .layer(middlewares::cors())
        .layer(AxumMiddleware::from_fn(middlewares::content_type));

    Router::new()
        // `POST /api/signup` goes to the sign-up controller.
        .nest("/api", server::routes::router())
        .route("/metrics", get(render_metrics))
        .with_state(state)
        .route_layer(AxumMiddleware::from_fn(telemetry::track))
        .layer(middleware)
}

/// Initialize the application state.
///
/// The returned [`Database`] must be closed on shutdown.
pub async fn initialize_state(
    config: Arc<config::Configuration>,
    metrics: Option<PrometheusHandle>,
) -> Result<(AppState, Database), Box<dyn std::error::Error>> {
    let pool_size = config
        .postgres
        .as_ref()
        .and_then(|postgres| postgres.pool_size)
        .unwrap_or(DEFAULT_POOL_SIZE);
    let db = Database::connect(
        &config.database_url()?,
        pool_size,
        config.timeouts.database(),
    )
    .await?;

    // execute migrations scripts on start.
    db.migrate().await?;

    let signup = server::factories::make_signup_controller(&db, &config)?;

    Ok((
        AppState {
            config,
            signup: Arc::new(signup),
            metrics,
        },
        db,
    ))
}
