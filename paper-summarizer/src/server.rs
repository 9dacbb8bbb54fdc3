use crate::pipeline::SummaryPipeline;
use crate::types::{SummarizeRequest, SummarizerError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SummaryPipeline>,
}

impl AppState {
    pub fn new(pipeline: SummaryPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            return SummarizerError::InvalidRequest(rejection.body_text()).into_response();
        }
    };

    let result = state
        .pipeline
        .run(&request)
        .instrument(info_span!("summarize", %request_id))
        .await;

    match result {
        Ok(summary) => (StatusCode::OK, summary).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "adapter": state.pipeline.adapter_name(),
    }))
}

impl IntoResponse for SummarizerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(kind = ?self.kind(), "Request failed: {}", self);
        } else {
            warn!(kind = ?self.kind(), "Request rejected: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
