use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use jobhub::applications::application_router;
use jobhub::formatting::{format_phone_number, format_zipcode};
use jobhub::postings::{posting_router, PostingBoard};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ContactFormatRequest {
    #[serde(default)]
    pub(crate) phone: String,
    #[serde(default)]
    pub(crate) zipcode: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct ContactFormatResponse {
    pub(crate) phone: String,
    pub(crate) zipcode: String,
}

pub(crate) fn with_board_routes(board: Arc<PostingBoard>) -> Router {
    posting_router(board)
        .merge(application_router())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/format/contact", post(format_contact_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Applies the as-you-type masks the application form uses.
pub(crate) async fn format_contact_endpoint(
    Json(payload): Json<ContactFormatRequest>,
) -> Json<ContactFormatResponse> {
    Json(ContactFormatResponse {
        phone: format_phone_number(&payload.phone),
        zipcode: format_zipcode(&payload.zipcode),
    })
}
