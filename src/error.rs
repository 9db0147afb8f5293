use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing '{0}' parameter")]
    MissingParameter(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Scrape service returned {status}: {body}")]
    ScrapeService { status: u16, body: String },

    #[error("Scrape request failed: {0}")]
    ScrapeRequest(String),

    #[error("Vision request failed: {0}")]
    Vision(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_)
            | AppError::ScrapeService { .. }
            | AppError::ScrapeRequest(_)
            | AppError::Vision(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ScrapeRequest(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
