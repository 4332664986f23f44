use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use serde_json::json;
use axum::Json;
use thiserror::Error;

/// Fatal errors for one upload. Nothing is rendered when one of these occurs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Malformed spreadsheet: {0}")]
    MalformedSpreadsheet(String),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaMismatch),
}

/// The uploaded sheet does not cover the canonical column layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected at least {required} columns, found {found} (missing: {})", .missing_columns.join(", "))]
pub struct SchemaMismatch {
    pub required: usize,
    pub found: usize,
    pub missing_columns: Vec<&'static str>,
}

/// Failures of the insight computation. They never abort the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no row has a usable value for {column}")]
    NoComparableData { column: &'static str },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MalformedSpreadsheet(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        let body = match &self {
            AppError::Schema(mismatch) => Json(json!({
                "error": self.to_string(),
                "required_columns": mismatch.required,
                "found_columns": mismatch.found,
                "missing_columns": mismatch.missing_columns,
            })),
            _ => Json(json!({
                "error": self.to_string()
            })),
        };

        (status, body).into_response()
    }
}
