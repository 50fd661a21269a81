//! HTTP API server for order creation.
//!
//! Exposes a single `/order` endpoint that validates a JSON order, writes it
//! through the domain service and maps every outcome to a JSON response with
//! CORS headers, plus `/health` and Prometheus `/metrics`.

pub mod config;
pub mod cors;
pub mod error;
pub mod routes;
pub mod validation;

use std::any::Any;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use common::ErrorResponse;
use common::error::INTERNAL_ERROR_MESSAGE;
use domain::{OrderRepository, OrderService};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use cors::CorsPolicy;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: OrderRepository + 'static>(
    state: Arc<AppState<R>>,
    cors: &CorsPolicy,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    let order_router = Router::new()
        .route(
            "/order",
            post(routes::orders::create::<R>)
                .options(routes::orders::preflight)
                .fallback(routes::orders::method_not_allowed),
        )
        .with_state(state);

    let app = Router::new()
        .route("/health", get(routes::ops::health))
        .merge(order_router)
        .merge(metrics_router)
        .layer(CatchPanicLayer::custom(handle_panic));

    // CORS wraps the panic handler so even a panic response carries it.
    cors.apply(app).layer(TraceLayer::new_for_http())
}

/// Creates the application state around the given repository.
pub fn create_state<R: OrderRepository>(repository: R) -> Arc<AppState<R>> {
    Arc::new(AppState {
        order_service: OrderService::new(repository),
    })
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail: &str = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "request handler panicked");

    metrics::counter!("order_requests_total", "status" => "500").increment(1);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::from_message(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}
