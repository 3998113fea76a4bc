use axum::{
    extract::Json,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use scribe_pdf::{
    render_report_with, suggested_filename, Letterhead, RenderError, RenderOptions,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

/// Request payload for the PDF generation endpoint
#[derive(Debug, Deserialize)]
pub struct GeneratePdfRequest {
    /// Formatted report text to lay out
    pub report: Option<String>,
    /// Download filename; a timestamped default is used when absent
    pub filename: Option<String>,
}

/// Standard error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message describing what went wrong
    pub error: String,
    /// Underlying failure detail, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application-specific error types for the API
#[derive(Debug)]
pub enum AppError {
    /// Caller sent no usable report text; rejected before the core runs
    InvalidInput(String),
    /// The layout engine or emitter failed
    Render(RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),
            AppError::Render(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "PDF generation failed".to_string(),
                    details: Some(err.to_string()),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err)
    }
}

/// Build the application router with all routes configured
pub fn app() -> Router {
    Router::new()
        .route("/api/generate-pdf", post(generate_pdf))
        .route("/api/health", get(health_check))
        .layer(CorsLayer::permissive())
}

/// Render the posted report text into a PDF download
pub async fn generate_pdf(
    Json(payload): Json<GeneratePdfRequest>,
) -> Result<Response, AppError> {
    let report = payload.report.as_deref().unwrap_or("");
    if report.trim().is_empty() {
        return Err(AppError::InvalidInput("Report text is required".to_string()));
    }

    let options = RenderOptions {
        letterhead: Some(Letterhead::pathology(Utc::now())),
        ..RenderOptions::default()
    };
    let pdf_bytes = render_report_with(report, &options)?;
    let filename = suggested_filename(payload.filename.as_deref());

    info!(bytes = pdf_bytes.len(), %filename, "report rendered");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf_bytes,
    )
        .into_response())
}

/// Health check endpoint for monitoring and load balancing
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "scribe-pdf API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
