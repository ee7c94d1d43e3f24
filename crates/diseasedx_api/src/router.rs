//! Router assembly.
//!
//! Routes live under `/api/` and answer with or without a trailing slash.

use crate::handlers;
use crate::state::AppState;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use std::time::Instant;

pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/diseases", get(handlers::list_diseases))
        .route("/diseases/", get(handlers::list_diseases))
        .route("/diseases/:id", get(handlers::disease_detail))
        .route("/diseases/:id/", get(handlers::disease_detail))
        .route("/symptom-checker", post(handlers::symptom_checker))
        .route("/symptom-checker/", post(handlers::symptom_checker))
        .route("/stats", get(handlers::stats))
        .route("/stats/", get(handlers::stats))
        .route("/health", get(handlers::health))
        .route("/health/", get(handlers::health))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn(log_request))
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=api method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
