use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;

use super::board::PostingBoard;
use super::domain::PostingQuery;
use super::views::JobDetailView;

/// Router builder exposing the postings list and detail endpoints.
pub fn posting_router(board: Arc<PostingBoard>) -> Router {
    Router::new()
        .route("/api/v1/postings", get(list_handler))
        .route("/api/v1/postings/:slug", get(detail_handler))
        .with_state(board)
}

pub(crate) async fn list_handler(
    State(board): State<Arc<PostingBoard>>,
    Query(query): Query<PostingQuery>,
) -> Response {
    let page = board.search(&query);
    (StatusCode::OK, Json(page.cards(Utc::now()))).into_response()
}

pub(crate) async fn detail_handler(
    State(board): State<Arc<PostingBoard>>,
    Path(slug): Path<String>,
) -> Response {
    match board.find_by_slug(&slug) {
        Some(posting) => {
            let view = JobDetailView::from_posting(&posting, Utc::now());
            (StatusCode::OK, Json(view)).into_response()
        }
        None => {
            let payload = json!({
                "error": "Job not found",
                "slug": slug,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
