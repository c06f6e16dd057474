use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, warn};
use serde::Serialize;

use crate::Error;
use crate::pipeline::{Pipeline, ProcessRequest, ProcessResponse};
use crate::summarize::TextGenerator;
use crate::transcript::TranscriptProvider;

pub const SERVICE_NAME: &str = "YouTube Video Summarizer API";

/// Failure body returned to callers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub category: &'static str,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::RequestValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::InvalidUrl { .. } | Error::TranscriptUnavailable { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            Error::InvalidUrl { .. } => "Invalid YouTube URL. Please provide a valid YouTube video URL.".to_string(),
            Error::Internal(_) => "An unexpected error occurred".to_string(),
            e if e.is_generation_failure() => format!("Failed to generate summary: {e}"),
            e => e.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if let Error::Internal(ref report) = self {
            error!("Unexpected error during video processing: {report:?}");
        }
        let body = ErrorResponse {
            category: self.category(),
            detail: self.detail(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn process_video<T, G>(
    State(pipeline): State<Arc<Pipeline<T, G>>>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, Error>
where
    T: TranscriptProvider + 'static,
    G: TextGenerator + 'static,
{
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected request body: {rejection}");
        Error::RequestValidation(rejection.body_text())
    })?;
    let response = pipeline.process(&request).await?;
    Ok(Json(response))
}

/// Routes for the summarizer API
pub fn router<T, G>(pipeline: Pipeline<T, G>) -> Router
where
    T: TranscriptProvider + 'static,
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/api/health", get(health))
        .route("/api/videos/process", post(process_video::<T, G>))
        .with_state(Arc::new(pipeline))
}
